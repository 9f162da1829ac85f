//! Member risk stratification and chronic condition impact
//!
//! A member's risk score is their annual cost. Tier thresholds are
//! nearest-rank percentiles of the scores of all members:
//!
//! | tier   | rule                                   |
//! |--------|----------------------------------------|
//! | High   | score >= high threshold                |
//! | Medium | score >= medium threshold              |
//! | Low    | everything else, and every zero score  |

use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::{average, largest_remainder_percentages, nearest_rank, Rate};
use crate::config::RiskConfig;
use crate::document::{
    ChronicConditionImpact, RiskTier, RiskTierSummary, AVERAGE_DP, MONEY_DP, PERCENT_DP, RATE_DP,
};
use crate::members::MemberProfile;

/// Score cutoffs derived from a member population
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    pub high: Decimal,
    pub medium: Decimal,
}

impl RiskThresholds {
    /// Nearest-rank thresholds over `scores`; `None` when there are no scores
    pub fn from_scores(scores: &[Decimal], config: &RiskConfig) -> Option<Self> {
        let mut sorted = scores.to_vec();
        sorted.sort();
        Some(Self {
            high: nearest_rank(&sorted, config.high_percentile)?,
            medium: nearest_rank(&sorted, config.medium_percentile)?,
        })
    }

    pub fn classify(&self, score: Decimal) -> RiskTier {
        if score <= Decimal::ZERO {
            RiskTier::Low
        } else if score >= self.high {
            RiskTier::High
        } else if score >= self.medium {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

/// Tier for each member, index-aligned with `members`
pub fn assign_tiers(members: &[MemberProfile], config: &RiskConfig) -> Vec<RiskTier> {
    let scores: Vec<Decimal> = members.iter().map(|m| m.annual_cost).collect();
    match RiskThresholds::from_scores(&scores, config) {
        Some(thresholds) => {
            debug!(high = %thresholds.high, medium = %thresholds.medium, "Risk thresholds");
            scores.iter().map(|s| thresholds.classify(*s)).collect()
        }
        None => Vec::new(),
    }
}

fn needs_case_management(tier: RiskTier, member: &MemberProfile, config: &RiskConfig) -> bool {
    match tier {
        RiskTier::High => true,
        RiskTier::Medium => member.chronic_conditions >= config.case_management_min_conditions,
        RiskTier::Low => false,
    }
}

#[derive(Default)]
struct TierTally {
    count: usize,
    cost: Decimal,
    conditions: usize,
    case_management: usize,
}

/// High, Medium and Low tier summaries, always in that order.
///
/// Every member lands in exactly one tier, so the counts sum to the number
/// of members. Percentages and cost shares each sum to exactly 100.0 when
/// there are members (respectively, any member cost).
pub fn compute_risk_stratification(members: &[MemberProfile], config: &RiskConfig) -> Vec<RiskTierSummary> {
    let tiers = assign_tiers(members, config);

    let mut tallies: [TierTally; 3] = Default::default();
    for (member, tier) in members.iter().zip(&tiers) {
        let tally = &mut tallies[tier_index(*tier)];
        tally.count += 1;
        tally.cost += member.annual_cost;
        tally.conditions += member.chronic_conditions;
        if needs_case_management(*tier, member, config) {
            tally.case_management += 1;
        }
    }

    let count_weights: Vec<Decimal> = tallies.iter().map(|t| Decimal::from(t.count)).collect();
    let cost_weights: Vec<Decimal> = tallies.iter().map(|t| t.cost).collect();
    let percentages = largest_remainder_percentages(&count_weights, PERCENT_DP);
    let cost_shares = largest_remainder_percentages(&cost_weights, PERCENT_DP);

    RiskTier::ALL
        .iter()
        .zip(tallies.iter())
        .enumerate()
        .map(|(i, (tier, tally))| RiskTierSummary {
            tier: *tier,
            count: tally.count as u64,
            percentage: percentages[i],
            avg_cost: average(tally.cost, tally.count, MONEY_DP),
            cost_share: cost_shares[i],
            avg_chronic_conditions: average(Decimal::from(tally.conditions), tally.count, AVERAGE_DP),
            needs_case_management: tally.case_management as u64,
        })
        .collect()
}

fn tier_index(tier: RiskTier) -> usize {
    match tier {
        RiskTier::High => 0,
        RiskTier::Medium => 1,
        RiskTier::Low => 2,
    }
}

/// Chronic condition buckets by number of conditions on file
pub const CONDITION_BUCKETS: [(&str, usize, usize); 4] = [
    ("0 conditions", 0, 0),
    ("1-2 conditions", 1, 2),
    ("3-5 conditions", 3, 5),
    ("6+ conditions", 6, usize::MAX),
];

/// Cost and utilization by chronic condition count; all four buckets are emitted
pub fn compute_chronic_conditions_impact(members: &[MemberProfile]) -> Vec<ChronicConditionImpact> {
    CONDITION_BUCKETS
        .iter()
        .map(|(label, low, high)| {
            let bucket: Vec<&MemberProfile> = members
                .iter()
                .filter(|m| m.chronic_conditions >= *low && m.chronic_conditions <= *high)
                .collect();
            let cost: Decimal = bucket.iter().map(|m| m.annual_cost).sum();
            let claims: usize = bucket.iter().map(|m| m.claims).sum();
            let denied: usize = bucket.iter().map(|m| m.denied_claims).sum();

            ChronicConditionImpact {
                condition_category: label.to_string(),
                count: bucket.len() as u64,
                avg_cost: average(cost, bucket.len(), MONEY_DP),
                avg_claims: average(Decimal::from(claims), bucket.len(), AVERAGE_DP),
                denial_rate: Rate::from_counts(denied, claims).rounded(RATE_DP).as_decimal(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::MemberId;
    use rust_decimal_macros::dec;

    fn member(n: usize, cost: Decimal, conditions: usize) -> MemberProfile {
        let mut m = MemberProfile::new(MemberId::new(format!("M{}", n)), conditions);
        m.annual_cost = cost;
        m.claims = usize::from(!cost.is_zero());
        m
    }

    #[test]
    fn test_ten_members_split_into_tiers() {
        let members: Vec<MemberProfile> =
            (1..=10).map(|n| member(n, Decimal::from(n * 100), 0)).collect();
        let summary = compute_risk_stratification(&members, &RiskConfig::default());

        // p90 -> 900, p65 -> rank 7 -> 700
        assert_eq!(summary[0].tier, RiskTier::High);
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[1].count, 2);
        assert_eq!(summary[2].count, 6);
        assert_eq!(summary.iter().map(|t| t.count).sum::<u64>(), 10);
        assert_eq!(summary.iter().map(|t| t.percentage).sum::<Decimal>(), dec!(100.0));
        assert_eq!(summary.iter().map(|t| t.cost_share).sum::<Decimal>(), dec!(100.0));
    }

    #[test]
    fn test_zero_cost_members_are_low() {
        let members: Vec<MemberProfile> = (1..=4).map(|n| member(n, dec!(0), 0)).collect();
        let summary = compute_risk_stratification(&members, &RiskConfig::default());
        assert_eq!(summary[2].count, 4);
        assert_eq!(summary[0].count, 0);
        assert_eq!(summary[2].cost_share, dec!(0));
    }

    #[test]
    fn test_case_management_counts() {
        let members = vec![
            member(1, dec!(100), 5),
            member(2, dec!(200), 4),
            member(3, dec!(300), 0),
            member(4, dec!(400), 1),
        ];
        let config = RiskConfig::default();
        let tiers = assign_tiers(&members, &config);
        // p90 -> 400, p65 -> rank 3 -> 300
        assert_eq!(tiers, vec![RiskTier::Low, RiskTier::Low, RiskTier::Medium, RiskTier::High]);

        let summary = compute_risk_stratification(&members, &config);
        assert_eq!(summary[0].needs_case_management, 1);
        assert_eq!(summary[1].needs_case_management, 0);
    }

    #[test]
    fn test_no_members() {
        let summary = compute_risk_stratification(&[], &RiskConfig::default());
        assert_eq!(summary.len(), 3);
        assert!(summary.iter().all(|t| t.count == 0 && t.percentage.is_zero()));
    }

    #[test]
    fn test_chronic_buckets() {
        let members = vec![member(1, dec!(100), 0), member(2, dec!(300), 2), member(3, dec!(500), 7)];
        let impact = compute_chronic_conditions_impact(&members);
        assert_eq!(impact.len(), 4);
        assert_eq!(impact[1].count, 1);
        assert_eq!(impact[1].avg_cost, dec!(300.00));
        assert_eq!(impact[2].count, 0);
        assert_eq!(impact[3].condition_category, "6+ conditions");
    }
}
