//! Report configuration
//!
//! Every threshold the aggregations use lives here, with defaults that
//! reproduce the warehouse's published report. Missing fields in a config
//! file fall back to these defaults.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::Currency;
use crate::error::ReportError;

/// Top-level report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Report title
    pub title: String,
    /// Name printed as the report's author
    pub prepared_by: String,
    /// Currency claim payments are recorded in
    pub currency: Currency,
    /// Percentile of claim payments above which a claim is high cost
    pub high_cost_percentile: Decimal,
    /// Claims per member at which a member counts as a frequent user
    pub frequent_user_claims: usize,
    /// Member risk tiering
    pub risk: RiskConfig,
    /// Provider ranking and performance tiers
    pub providers: ProviderConfig,
    /// Recommendation rules
    pub recommendations: RecommendationConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Claims Data Warehouse - Business Intelligence Report".to_string(),
            prepared_by: "Claims Analytics".to_string(),
            currency: Currency::USD,
            high_cost_percentile: dec!(95),
            frequent_user_claims: 10,
            risk: RiskConfig::default(),
            providers: ProviderConfig::default(),
            recommendations: RecommendationConfig::default(),
        }
    }
}

/// Percentile thresholds for member risk tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Members at or above this cost percentile are High risk
    pub high_percentile: Decimal,
    /// Members at or above this cost percentile are at least Medium risk
    pub medium_percentile: Decimal,
    /// Medium-risk members with this many chronic conditions need case management
    pub case_management_min_conditions: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            high_percentile: dec!(90),
            medium_percentile: dec!(65),
            case_management_min_conditions: 3,
        }
    }
}

/// Denial-rate cutoffs for provider performance tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Number of providers listed in the ranking
    pub top_n: usize,
    /// Denial rate below which a provider is a Top Performer
    pub top_performer_max_denial: Decimal,
    /// Denial rate below which a provider is a High Performer
    pub high_performer_max_denial: Decimal,
    /// Denial rate below which a provider is an Average Performer
    pub average_performer_max_denial: Decimal,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            top_performer_max_denial: dec!(0.015),
            high_performer_max_denial: dec!(0.025),
            average_performer_max_denial: dec!(0.04),
        }
    }
}

/// Inputs for the cost and quality recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// A provider whose average claim exceeds this multiple of the overall average is high cost
    pub high_cost_provider_factor: Decimal,
    /// Share of excess provider spend assumed recoverable
    pub provider_savings_rate: Decimal,
    /// Share of high-risk member cost assumed recoverable through case management
    pub case_management_savings_rate: Decimal,
    /// Claims taking longer than this many days are slow
    pub slow_claim_days: u32,
    /// Target average processing time
    pub target_processing_days: Decimal,
    /// Target provider denial rate
    pub target_denial_rate: Decimal,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            high_cost_provider_factor: dec!(1.5),
            provider_savings_rate: dec!(0.10),
            case_management_savings_rate: dec!(0.15),
            slow_claim_days: 14,
            target_processing_days: dec!(7.0),
            target_denial_rate: dec!(0.015),
        }
    }
}

fn check_percentile(name: &str, value: Decimal) -> Result<(), ReportError> {
    if value <= dec!(0) || value > dec!(100) {
        return Err(ReportError::invalid_config(format!(
            "{} must be in (0, 100], got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_fraction(name: &str, value: Decimal) -> Result<(), ReportError> {
    if value < dec!(0) || value > dec!(1) {
        return Err(ReportError::invalid_config(format!(
            "{} must be a fraction in [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

impl ReportConfig {
    /// Rejects thresholds the aggregations cannot work with
    pub fn validate(&self) -> Result<(), ReportError> {
        check_percentile("high_cost_percentile", self.high_cost_percentile)?;
        check_percentile("risk.high_percentile", self.risk.high_percentile)?;
        check_percentile("risk.medium_percentile", self.risk.medium_percentile)?;
        if self.risk.medium_percentile >= self.risk.high_percentile {
            return Err(ReportError::invalid_config(
                "risk.medium_percentile must be below risk.high_percentile",
            ));
        }

        if self.providers.top_n == 0 {
            return Err(ReportError::invalid_config("providers.top_n must be at least 1"));
        }
        let p = &self.providers;
        check_fraction("providers.top_performer_max_denial", p.top_performer_max_denial)?;
        check_fraction("providers.high_performer_max_denial", p.high_performer_max_denial)?;
        check_fraction("providers.average_performer_max_denial", p.average_performer_max_denial)?;
        if !(p.top_performer_max_denial <= p.high_performer_max_denial
            && p.high_performer_max_denial <= p.average_performer_max_denial)
        {
            return Err(ReportError::invalid_config(
                "provider denial cutoffs must be ascending (top <= high <= average)",
            ));
        }

        let r = &self.recommendations;
        if r.high_cost_provider_factor < dec!(1) {
            return Err(ReportError::invalid_config(
                "recommendations.high_cost_provider_factor must be at least 1",
            ));
        }
        check_fraction("recommendations.provider_savings_rate", r.provider_savings_rate)?;
        check_fraction("recommendations.case_management_savings_rate", r.case_management_savings_rate)?;
        check_fraction("recommendations.target_denial_rate", r.target_denial_rate)?;
        Ok(())
    }
}
