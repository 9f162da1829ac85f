//! Headline metrics and KPI categories for the executive summary

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::{average, percentage_of, Rate};
use domain_claims::ClaimsDataset;
use crate::config::ReportConfig;
use crate::document::{
    ClaimTypeShare, FinancialKpis, HighCostAnalysis, KeyMetrics, KpiCategories, QualityKpis,
    ReportMetadata, RiskKpis, RiskTier, RiskTierSummary, UtilizationKpis, MONEY_DP, PERCENT_DP,
    RATE_DP,
};
use crate::financial::coverage_period;
use crate::members::MemberProfile;
use crate::operational::average_processing_days;

/// Placeholder coverage period when no claim carries a service date
pub const NO_DATED_CLAIMS: &str = "No dated claims";

/// Decimal places for per-member ratios
const RATIO_DP: u32 = 2;

/// Accepted seed rows as a percentage of all rows read; zero when nothing was read
pub fn data_quality_score(dataset: &ClaimsDataset) -> Decimal {
    let accepted = dataset.accepted_rows();
    let total = accepted + dataset.rejected_rows();
    percentage_of(Decimal::from(accepted), Decimal::from(total), PERCENT_DP)
}

pub fn build_report_metadata(dataset: &ClaimsDataset, config: &ReportConfig, as_of: NaiveDate) -> ReportMetadata {
    ReportMetadata {
        title: config.title.clone(),
        generated_date: as_of,
        prepared_by: config.prepared_by.clone(),
        coverage_period: coverage_period(dataset.claims()).unwrap_or_else(|| NO_DATED_CLAIMS.to_string()),
        data_quality_score: data_quality_score(dataset),
        currency: dataset.currency(),
    }
}

/// Headline figures.
///
/// `total_claim_value` is the sum of the per-type totals in `distribution`
/// so the two always agree to the cent.
pub fn compute_key_metrics(dataset: &ClaimsDataset, distribution: &[ClaimTypeShare]) -> KeyMetrics {
    let claims = dataset.claims();
    let raw_total: Decimal = claims.iter().map(|c| c.amount()).sum();
    let denied = claims.iter().filter(|c| c.denied).count();

    KeyMetrics {
        total_beneficiaries: dataset.beneficiaries().len() as u64,
        total_providers: dataset.providers().len() as u64,
        total_claims: claims.len() as u64,
        total_claim_value: distribution.iter().map(|s| s.total_value).sum(),
        avg_claim_amount: average(raw_total, claims.len(), MONEY_DP),
        overall_denial_rate: Rate::from_counts(denied, claims.len()).rounded(RATE_DP).as_decimal(),
        avg_processing_days: average_processing_days(claims),
    }
}

/// Inputs the KPI categories draw on besides the dataset
pub struct KpiInputs<'a> {
    pub key_metrics: &'a KeyMetrics,
    pub members: &'a [MemberProfile],
    pub risk_tiers: &'a [RiskTierSummary],
    pub high_cost: &'a HighCostAnalysis,
    pub data_quality_score: Decimal,
}

pub fn compute_kpi_categories(dataset: &ClaimsDataset, inputs: &KpiInputs<'_>, config: &ReportConfig) -> KpiCategories {
    let claims = dataset.claims();
    let total: Decimal = claims.iter().map(|c| c.amount()).sum();
    let reimbursed: Decimal = claims.iter().map(|c| c.reimbursed_amount()).sum();
    let member_count = dataset.beneficiaries().len();

    let high_risk_members = inputs
        .risk_tiers
        .iter()
        .find(|t| t.tier == RiskTier::High)
        .map(|t| t.count)
        .unwrap_or(0);
    let frequent_users = inputs
        .members
        .iter()
        .filter(|m| m.claims >= config.frequent_user_claims)
        .count();

    KpiCategories {
        financial: FinancialKpis {
            avg_claim_amount: inputs.key_metrics.avg_claim_amount,
            total_reimbursement: reimbursed.round_dp(MONEY_DP),
            reimbursement_rate: Rate::from_ratio(reimbursed, total).rounded(RATE_DP).as_decimal(),
            cost_per_member: average(total, member_count, MONEY_DP),
        },
        utilization: UtilizationKpis {
            claims_per_member: average(Decimal::from(claims.len()), member_count, RATIO_DP),
            provider_diversity: dataset.distinct_billing_providers() as u64,
            members_with_claims: inputs.members.iter().filter(|m| m.claims > 0).count() as u64,
        },
        quality: QualityKpis {
            denial_rate: inputs.key_metrics.overall_denial_rate,
            processing_time: inputs.key_metrics.avg_processing_days,
            data_quality_rate: Rate::from_percentage(inputs.data_quality_score)
                .rounded(RATE_DP)
                .as_decimal(),
        },
        risk: RiskKpis {
            high_risk_members,
            high_cost_claims: inputs.high_cost.high_cost_count,
            frequent_users: frequent_users as u64,
        },
    }
}
