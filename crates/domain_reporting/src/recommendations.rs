//! Cost and quality recommendations
//!
//! Each rule is evaluated against computed figures and only produces a
//! recommendation when it affects at least one provider, member or claim.

use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::Rate;
use domain_claims::ClaimRecord;
use crate::config::RecommendationConfig;
use crate::document::{
    AffectedPopulation, CostOpportunity, ImprovementMetric, QualityImprovement, Recommendations,
    RiskTier, AVERAGE_DP, MONEY_DP, RATE_DP,
};
use crate::members::MemberProfile;
use crate::operational::average_processing_days;
use crate::providers::ProviderStats;

/// Figures the recommendation rules read
pub struct RecommendationInputs<'a> {
    pub claims: &'a [ClaimRecord],
    pub providers: &'a [ProviderStats],
    pub members: &'a [MemberProfile],
    /// Tier per member, index-aligned with `members`
    pub member_tiers: &'a [RiskTier],
}

fn overall_average(claims: &[ClaimRecord]) -> Option<Decimal> {
    if claims.is_empty() {
        return None;
    }
    let total: Decimal = claims.iter().map(|c| c.amount()).sum();
    Some(total / Decimal::from(claims.len()))
}

fn high_cost_providers(inputs: &RecommendationInputs<'_>, config: &RecommendationConfig) -> Option<CostOpportunity> {
    let overall = overall_average(inputs.claims)?;
    let cutoff = overall * config.high_cost_provider_factor;

    let flagged: Vec<&ProviderStats> = inputs
        .providers
        .iter()
        .filter(|p| p.claims > 0 && p.total_value / Decimal::from(p.claims) > cutoff)
        .collect();
    if flagged.is_empty() {
        return None;
    }

    let excess: Decimal = flagged
        .iter()
        .map(|p| p.total_value - overall * Decimal::from(p.claims))
        .sum();

    Some(CostOpportunity {
        opportunity: "High-Cost Provider Management".to_string(),
        affected: AffectedPopulation::Providers,
        affected_count: flagged.len() as u64,
        potential_savings: (excess * config.provider_savings_rate).round_dp(MONEY_DP),
        action: format!(
            "Review utilization and negotiate rates with providers averaging more than {}x the overall claim amount",
            config.high_cost_provider_factor.normalize()
        ),
    })
}

fn case_management(inputs: &RecommendationInputs<'_>, config: &RecommendationConfig) -> Option<CostOpportunity> {
    let high_risk: Vec<&MemberProfile> = inputs
        .members
        .iter()
        .zip(inputs.member_tiers)
        .filter(|(_, tier)| **tier == RiskTier::High)
        .map(|(m, _)| m)
        .collect();
    if high_risk.is_empty() {
        return None;
    }

    let cost: Decimal = high_risk.iter().map(|m| m.annual_cost).sum();
    Some(CostOpportunity {
        opportunity: "High-Risk Member Case Management".to_string(),
        affected: AffectedPopulation::Members,
        affected_count: high_risk.len() as u64,
        potential_savings: (cost * config.case_management_savings_rate).round_dp(MONEY_DP),
        action: "Enroll high-risk members in case management and care coordination programs".to_string(),
    })
}

fn processing_efficiency(inputs: &RecommendationInputs<'_>, config: &RecommendationConfig) -> Option<QualityImprovement> {
    let slow = inputs
        .claims
        .iter()
        .filter(|c| c.processing_days.is_some_and(|d| d > config.slow_claim_days))
        .count();
    if slow == 0 {
        return None;
    }
    let current = average_processing_days(inputs.claims)?;

    Some(QualityImprovement {
        area: "Claims Processing Efficiency".to_string(),
        affected: AffectedPopulation::Claims,
        affected_count: slow as u64,
        metric: ImprovementMetric::processing_days(current, config.target_processing_days.round_dp(AVERAGE_DP)),
        recommendation: format!(
            "Automate review of claims taking longer than {} days to process",
            config.slow_claim_days
        ),
    })
}

fn provider_network_quality(inputs: &RecommendationInputs<'_>, config: &RecommendationConfig) -> Option<QualityImprovement> {
    let flagged: Vec<&ProviderStats> = inputs
        .providers
        .iter()
        .filter(|p| p.claims > 0 && p.denial_rate().as_decimal() > config.target_denial_rate)
        .collect();
    if flagged.is_empty() {
        return None;
    }

    let claims: usize = flagged.iter().map(|p| p.claims).sum();
    let denied: usize = flagged.iter().map(|p| p.denied_claims).sum();

    Some(QualityImprovement {
        area: "Provider Network Quality".to_string(),
        affected: AffectedPopulation::Providers,
        affected_count: flagged.len() as u64,
        metric: ImprovementMetric::denial_rate(
            Rate::from_counts(denied, claims).rounded(RATE_DP).as_decimal(),
            config.target_denial_rate,
        ),
        recommendation: "Provide billing education and documentation support to providers with elevated denial rates"
            .to_string(),
    })
}

/// Evaluates every rule; empty lists when nothing is affected
pub fn compute_recommendations(inputs: &RecommendationInputs<'_>, config: &RecommendationConfig) -> Recommendations {
    let recommendations = Recommendations {
        cost_optimization: [high_cost_providers(inputs, config), case_management(inputs, config)]
            .into_iter()
            .flatten()
            .collect(),
        quality_improvements: [
            processing_efficiency(inputs, config),
            provider_network_quality(inputs, config),
        ]
        .into_iter()
        .flatten()
        .collect(),
    };
    debug!(
        cost = recommendations.cost_optimization.len(),
        quality = recommendations.quality_improvements.len(),
        "Recommendations evaluated"
    );
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ClaimId, Currency, MemberId, Money, ProviderId};
    use domain_claims::ClaimType;
    use rust_decimal_macros::dec;

    fn claim(n: u32, amount: Decimal) -> ClaimRecord {
        ClaimRecord::new(
            ClaimId::new(format!("C{}", n)),
            MemberId::new("M1"),
            ClaimType::Carrier,
            Money::new(amount, Currency::USD),
        )
    }

    fn provider(npi: &str, claims: usize, denied: usize, value: Decimal) -> ProviderStats {
        ProviderStats {
            npi: ProviderId::new(npi),
            name: npi.to_string(),
            specialty: "General".to_string(),
            claims,
            denied_claims: denied,
            total_value: value,
        }
    }

    #[test]
    fn test_no_inputs_no_recommendations() {
        let inputs = RecommendationInputs {
            claims: &[],
            providers: &[],
            members: &[],
            member_tiers: &[],
        };
        let recs = compute_recommendations(&inputs, &RecommendationConfig::default());
        assert!(recs.cost_optimization.is_empty());
        assert!(recs.quality_improvements.is_empty());
    }

    #[test]
    fn test_high_cost_provider_savings() {
        let mut claims: Vec<ClaimRecord> = (1..=8).map(|n| claim(n, dec!(100))).collect();
        claims.push(claim(9, dec!(400)));
        claims.push(claim(10, dec!(400)));
        // total 1600 / 10 = 160 overall, cutoff 240
        let providers = vec![provider("A", 2, 0, dec!(800)), provider("B", 8, 0, dec!(800))];
        let inputs = RecommendationInputs {
            claims: &claims,
            providers: &providers,
            members: &[],
            member_tiers: &[],
        };
        let recs = compute_recommendations(&inputs, &RecommendationConfig::default());
        let opp = &recs.cost_optimization[0];
        assert_eq!(opp.affected_count, 1);
        // excess = 800 - 160 * 2 = 480, savings 10%
        assert_eq!(opp.potential_savings, dec!(48.00));
    }

    #[test]
    fn test_quality_rules() {
        let claims = vec![
            claim(1, dec!(10)).with_processing_days(20),
            claim(2, dec!(10)).with_processing_days(4),
        ];
        let providers = vec![provider("A", 10, 1, dec!(100)), provider("B", 100, 1, dec!(100))];
        let inputs = RecommendationInputs {
            claims: &claims,
            providers: &providers,
            members: &[],
            member_tiers: &[],
        };
        let recs = compute_recommendations(&inputs, &RecommendationConfig::default());
        assert_eq!(recs.quality_improvements.len(), 2);

        let processing = &recs.quality_improvements[0];
        assert_eq!(processing.affected_count, 1);
        assert_eq!(
            processing.metric,
            ImprovementMetric::processing_days(dec!(12.0), dec!(7.0))
        );

        let network = &recs.quality_improvements[1];
        assert_eq!(network.affected_count, 1);
        assert_eq!(
            network.metric,
            ImprovementMetric::denial_rate(dec!(0.1), dec!(0.015))
        );
    }
}
