//! Report assembly
//!
//! `ReportAggregator` runs every aggregation over a `ClaimsDataset` and
//! assembles the sections into a verified `ReportDocument`.

use chrono::NaiveDate;
use tracing::{debug, info};

use domain_claims::ClaimsDataset;
use crate::config::ReportConfig;
use crate::distribution::compute_claim_type_distribution;
use crate::document::{
    ExecutiveSummary, FinancialAnalysis, MemberRiskAnalysis, OperationalAnalysis, ReportDocument,
};
use crate::error::ReportError;
use crate::financial::{compute_high_cost_analysis, compute_monthly_trends};
use crate::kpi::{build_report_metadata, compute_key_metrics, compute_kpi_categories, KpiInputs};
use crate::members::build_member_profiles;
use crate::operational::compute_processing_efficiency;
use crate::providers::{compute_provider_analysis, provider_stats};
use crate::recommendations::{compute_recommendations, RecommendationInputs};
use crate::risk::{assign_tiers, compute_chronic_conditions_impact, compute_risk_stratification};

/// Builds report documents with a fixed configuration
#[derive(Debug, Clone)]
pub struct ReportAggregator {
    config: ReportConfig,
}

impl ReportAggregator {
    /// Creates an aggregator, rejecting an unusable configuration
    pub fn new(config: ReportConfig) -> Result<Self, ReportError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Computes every section for `dataset` as of `as_of` and verifies the result
    pub fn generate(&self, dataset: &ClaimsDataset, as_of: NaiveDate) -> Result<ReportDocument, ReportError> {
        if dataset.currency() != self.config.currency {
            return Err(ReportError::invalid_config(format!(
                "dataset is in {}, report configured for {}",
                dataset.currency(),
                self.config.currency
            )));
        }

        info!(
            claims = dataset.claims().len(),
            providers = dataset.providers().len(),
            beneficiaries = dataset.beneficiaries().len(),
            %as_of,
            "Generating claims report"
        );

        let claims = dataset.claims();
        let metadata = build_report_metadata(dataset, &self.config, as_of);
        let distribution = compute_claim_type_distribution(claims);
        let key_metrics = compute_key_metrics(dataset, &distribution);

        let members = build_member_profiles(dataset);
        let member_tiers = assign_tiers(&members, &self.config.risk);
        let risk_stratification = compute_risk_stratification(&members, &self.config.risk);
        let chronic_conditions_impact = compute_chronic_conditions_impact(&members);
        debug!(members = members.len(), "Member risk computed");

        let monthly_trends = compute_monthly_trends(claims);
        let high_cost_analysis = compute_high_cost_analysis(claims, self.config.high_cost_percentile);
        debug!(
            months = monthly_trends.len(),
            high_cost = high_cost_analysis.high_cost_count,
            "Financial analysis computed"
        );

        let providers = provider_stats(dataset);
        let provider_analysis = compute_provider_analysis(&providers, &self.config.providers);

        let kpi_categories = compute_kpi_categories(
            dataset,
            &KpiInputs {
                key_metrics: &key_metrics,
                members: &members,
                risk_tiers: &risk_stratification,
                high_cost: &high_cost_analysis,
                data_quality_score: metadata.data_quality_score,
            },
            &self.config,
        );

        let recommendations = compute_recommendations(
            &RecommendationInputs {
                claims,
                providers: &providers,
                members: &members,
                member_tiers: &member_tiers,
            },
            &self.config.recommendations,
        );

        let document = ReportDocument {
            executive_summary: ExecutiveSummary {
                report_metadata: metadata,
                key_metrics,
                claim_type_distribution: distribution,
                kpi_categories,
            },
            financial_analysis: FinancialAnalysis {
                monthly_trends,
                high_cost_analysis,
            },
            provider_analysis,
            member_risk_analysis: MemberRiskAnalysis {
                risk_stratification,
                chronic_conditions_impact,
            },
            operational_analysis: OperationalAnalysis {
                processing_efficiency: compute_processing_efficiency(claims),
            },
            recommendations,
        };

        document.verify()?;
        info!(
            total_claims = document.executive_summary.key_metrics.total_claims,
            total_value = %document.executive_summary.key_metrics.total_claim_value,
            "Claims report generated"
        );
        Ok(document)
    }
}
