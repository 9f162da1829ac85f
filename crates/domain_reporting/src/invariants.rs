//! Consistency checks run on every document before it leaves the aggregator

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::document::ReportDocument;
use crate::error::ReportError;

/// Allowed drift of a percentage distribution from 100
pub const PERCENT_TOLERANCE: Decimal = dec!(0.1);

fn check_sums_to_100(check: &'static str, values: impl Iterator<Item = Decimal>) -> Result<(), ReportError> {
    let sum: Decimal = values.sum();
    if (sum - dec!(100)).abs() > PERCENT_TOLERANCE {
        return Err(ReportError::violation(
            check,
            format!("percentages sum to {}, expected 100.0", sum),
        ));
    }
    Ok(())
}

impl ReportDocument {
    /// Verifies the cross-section totals agree.
    ///
    /// Percentage checks only apply to non-empty distributions; an empty
    /// dataset produces all-zero percentages.
    pub fn verify(&self) -> Result<(), ReportError> {
        let summary = &self.executive_summary;
        let metrics = &summary.key_metrics;
        let distribution = &summary.claim_type_distribution;

        let type_count: u64 = distribution.iter().map(|s| s.count).sum();
        if type_count != metrics.total_claims {
            return Err(ReportError::violation(
                "claim_type_counts",
                format!("claim types count {} claims, key metrics {}", type_count, metrics.total_claims),
            ));
        }

        let type_value: Decimal = distribution.iter().map(|s| s.total_value).sum();
        if type_value != metrics.total_claim_value {
            return Err(ReportError::violation(
                "claim_type_values",
                format!(
                    "claim types total {}, key metrics {}",
                    type_value, metrics.total_claim_value
                ),
            ));
        }

        if metrics.total_claims > 0 {
            check_sums_to_100("claim_type_percentages", distribution.iter().map(|s| s.percentage))?;
        }

        let tiers = &self.member_risk_analysis.risk_stratification;
        let tier_count: u64 = tiers.iter().map(|t| t.count).sum();
        if tier_count != metrics.total_beneficiaries {
            return Err(ReportError::violation(
                "risk_tier_counts",
                format!(
                    "risk tiers hold {} members, key metrics {}",
                    tier_count, metrics.total_beneficiaries
                ),
            ));
        }
        if metrics.total_beneficiaries > 0 {
            check_sums_to_100("risk_tier_percentages", tiers.iter().map(|t| t.percentage))?;
        }
        if tiers.iter().any(|t| t.avg_cost > Decimal::ZERO) {
            check_sums_to_100("risk_cost_shares", tiers.iter().map(|t| t.cost_share))?;
        }

        let buckets = &self.operational_analysis.processing_efficiency;
        if buckets.iter().any(|b| b.count > 0) {
            check_sums_to_100("processing_percentages", buckets.iter().map(|b| b.percentage))?;
        }

        Ok(())
    }
}
