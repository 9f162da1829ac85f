//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for report figures that give
//! more meaningful error messages than standard assertions.

use domain_reporting::document::{ClaimTypeShare, RiskTierSummary};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Asserts that a percentage distribution sums to 100 within 0.1
pub fn assert_percentages_sum_to_100(percentages: impl IntoIterator<Item = Decimal>) {
    let values: Vec<Decimal> = percentages.into_iter().collect();
    let sum: Decimal = values.iter().sum();
    assert!(
        (sum - dec!(100)).abs() <= dec!(0.1),
        "Percentages {:?} sum to {}, expected 100.0",
        values,
        sum
    );
}

/// Asserts each claim type's average times its count reproduces its total within a cent
pub fn assert_distribution_consistent(shares: &[ClaimTypeShare]) {
    for share in shares {
        if share.count == 0 {
            assert!(
                share.percentage.is_zero() && share.avg_value.is_zero(),
                "Empty claim type {} reports percentage {} and average {}",
                share.claim_type,
                share.percentage,
                share.avg_value
            );
            continue;
        }
        let avg = share.total_value / Decimal::from(share.count);
        assert!(
            (avg - share.avg_value).abs() <= dec!(0.01),
            "{}: total {} / count {} = {}, reported average {}",
            share.claim_type,
            share.total_value,
            share.count,
            avg,
            share.avg_value
        );
    }
}

/// Asserts the risk tiers hold exactly `members` members
pub fn assert_tiers_cover_members(tiers: &[RiskTierSummary], members: u64) {
    let total: u64 = tiers.iter().map(|t| t.count).sum();
    assert_eq!(
        total, members,
        "Risk tiers hold {} members, expected {}",
        total, members
    );
}
