//! Monthly trends and high-cost claim analysis

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use core_kernel::{average, nearest_rank, percentage_of, Rate};
use domain_claims::ClaimRecord;
use crate::document::{HighCostAnalysis, MonthlyTrend, AVERAGE_DP, MONEY_DP, PERCENT_DP, RATE_DP};

#[derive(Default)]
struct MonthTally {
    claims: usize,
    denied: usize,
    total: Decimal,
    reimbursed: Decimal,
}

/// Claims grouped by service month, oldest first.
///
/// Claims without a service date are left out.
pub fn compute_monthly_trends(claims: &[ClaimRecord]) -> Vec<MonthlyTrend> {
    let mut months: BTreeMap<String, MonthTally> = BTreeMap::new();
    for claim in claims {
        let Some(month) = claim.service_month() else {
            continue;
        };
        let tally = months.entry(month).or_default();
        tally.claims += 1;
        tally.denied += usize::from(claim.denied);
        tally.total += claim.amount();
        tally.reimbursed += claim.reimbursed_amount();
    }

    months
        .into_iter()
        .map(|(month, t)| MonthlyTrend {
            month,
            claims: t.claims as u64,
            total_value: t.total.round_dp(MONEY_DP),
            reimbursed: t.reimbursed.round_dp(MONEY_DP),
            reimbursement_rate: Rate::from_ratio(t.reimbursed, t.total).rounded(RATE_DP).as_decimal(),
            denial_rate: Rate::from_counts(t.denied, t.claims).rounded(RATE_DP).as_decimal(),
        })
        .collect()
}

/// Payment amount at `percentile` (nearest rank); zero without claims
pub fn high_cost_threshold(claims: &[ClaimRecord], percentile: Decimal) -> Decimal {
    let mut amounts: Vec<Decimal> = claims.iter().map(|c| c.amount()).collect();
    amounts.sort();
    nearest_rank(&amounts, percentile).unwrap_or(Decimal::ZERO)
}

/// Claims at or above the threshold, when there are any claims
pub fn high_cost_claims<'a>(claims: &'a [ClaimRecord], threshold: Decimal) -> Vec<&'a ClaimRecord> {
    if claims.is_empty() {
        return Vec::new();
    }
    claims.iter().filter(|c| c.amount() >= threshold).collect()
}

/// Size and cost of the high-cost claim segment
pub fn compute_high_cost_analysis(claims: &[ClaimRecord], percentile: Decimal) -> HighCostAnalysis {
    let threshold = high_cost_threshold(claims, percentile);
    let high_cost = high_cost_claims(claims, threshold);

    let total_value: Decimal = claims.iter().map(|c| c.amount()).sum();
    let high_value: Decimal = high_cost.iter().map(|c| c.amount()).sum();
    let durations: Vec<u32> = high_cost.iter().filter_map(|c| c.processing_days).collect();
    let avg_processing_days = (!durations.is_empty()).then(|| {
        let days: u64 = durations.iter().map(|d| u64::from(*d)).sum();
        average(Decimal::from(days), durations.len(), AVERAGE_DP)
    });

    HighCostAnalysis {
        threshold_amount: threshold.round_dp(MONEY_DP),
        high_cost_count: high_cost.len() as u64,
        pct_of_total_claims: percentage_of(
            Decimal::from(high_cost.len()),
            Decimal::from(claims.len()),
            PERCENT_DP,
        ),
        pct_of_total_value: percentage_of(high_value, total_value, PERCENT_DP),
        avg_processing_days,
        avg_amount: average(high_value, high_cost.len(), MONEY_DP),
    }
}

/// `first to last` service month, or `None` when no claim is dated
pub fn coverage_period(claims: &[ClaimRecord]) -> Option<String> {
    let first = claims.iter().filter_map(|c| c.service_date).min()?;
    let last = claims.iter().filter_map(|c| c.service_date).max()?;
    Some(format!("{} to {}", first.format("%Y-%m"), last.format("%Y-%m")))
}
