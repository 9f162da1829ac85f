//! Tests for report aggregation, the report document, and its invariants

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Money;
use domain_claims::{ClaimDataError, ClaimType};
use domain_reporting::document::{AffectedPopulation, MetricKind, ReportDocument, RiskTier};
use domain_reporting::{
    compute_claim_type_distribution, compute_risk_stratification, PerformanceTier, ReportAggregator,
    ReportConfig, ReportError, RiskConfig,
};
use domain_reporting::members::build_member_profiles;

use test_utils::{
    assert_distribution_consistent, assert_percentages_sum_to_100, assert_tiers_cover_members,
    dataset_strategy, DatasetBuilder, DatasetFixtures, DateFixtures, ReportFixtures, SampleFigures,
};

// ============================================================================
// Claim Type Distribution Tests
// ============================================================================

mod distribution_tests {
    use super::*;

    #[test]
    fn test_inpatient_share_of_ten_claims() {
        let dataset = DatasetBuilder::new()
            .with_typed_claims(ClaimType::Inpatient, &[dec!(100), dec!(200), dec!(300)])
            .with_typed_claims(ClaimType::Outpatient, &[dec!(10); 4])
            .with_typed_claims(ClaimType::Carrier, &[dec!(5); 3])
            .build();

        let shares = compute_claim_type_distribution(dataset.claims());
        let inpatient = &shares[0];
        assert_eq!(inpatient.percentage, dec!(30.0));
        assert_eq!(inpatient.avg_value, dec!(200.00));
        assert_percentages_sum_to_100(shares.iter().map(|s| s.percentage));
        assert_distribution_consistent(&shares);
    }

    #[test]
    fn test_absent_category_is_zero() {
        let dataset = DatasetBuilder::new()
            .with_typed_claims(ClaimType::Carrier, &[dec!(12.34)])
            .build();

        let shares = compute_claim_type_distribution(dataset.claims());
        for share in &shares[..2] {
            assert_eq!(share.count, 0);
            assert_eq!(share.percentage, Decimal::ZERO);
            assert_eq!(share.avg_value, Decimal::ZERO);
        }
    }

    #[test]
    fn test_thirds_still_sum_to_100() {
        let dataset = DatasetBuilder::new()
            .with_typed_claims(ClaimType::Inpatient, &[dec!(1)])
            .with_typed_claims(ClaimType::Outpatient, &[dec!(1)])
            .with_typed_claims(ClaimType::Carrier, &[dec!(1)])
            .build();

        let shares = compute_claim_type_distribution(dataset.claims());
        let total: Decimal = shares.iter().map(|s| s.percentage).sum();
        assert_eq!(total, dec!(100.0));
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let shares = compute_claim_type_distribution(&[]);
        assert_eq!(shares.len(), 3);
        assert!(shares.iter().all(|s| s.count == 0 && s.percentage.is_zero()));
    }
}

// ============================================================================
// Risk Stratification Tests
// ============================================================================

mod risk_tests {
    use super::*;

    #[test]
    fn test_sample_members_tiered() {
        let dataset = DatasetFixtures::sample();
        let members = build_member_profiles(&dataset);
        let tiers = compute_risk_stratification(&members, &RiskConfig::default());

        assert_tiers_cover_members(&tiers, SampleFigures::BENEFICIARIES);
        let counts: Vec<(RiskTier, u64)> = tiers.iter().map(|t| (t.tier, t.count)).collect();
        assert_eq!(
            counts,
            vec![(RiskTier::High, 1), (RiskTier::Medium, 1), (RiskTier::Low, 3)]
        );
        assert_eq!(tiers[0].avg_cost, dec!(12075.50));
        assert_eq!(tiers[0].needs_case_management, 1);
        assert_percentages_sum_to_100(tiers.iter().map(|t| t.percentage));
        assert_percentages_sum_to_100(tiers.iter().map(|t| t.cost_share));
    }

    #[test]
    fn test_members_without_claims_are_counted() {
        let dataset = DatasetBuilder::new().with_members(7).build();
        let members = build_member_profiles(&dataset);
        let tiers = compute_risk_stratification(&members, &RiskConfig::default());
        assert_tiers_cover_members(&tiers, 7);
        assert_eq!(tiers[2].count, 7);
    }
}

// ============================================================================
// Report Generation Tests
// ============================================================================

mod report_tests {
    use super::*;

    #[test]
    fn test_sample_key_metrics() {
        let report = ReportFixtures::sample_report();
        let metrics = &report.executive_summary.key_metrics;

        assert_eq!(metrics.total_claims, SampleFigures::CLAIMS);
        assert_eq!(metrics.total_beneficiaries, SampleFigures::BENEFICIARIES);
        assert_eq!(metrics.total_providers, SampleFigures::PROVIDERS);
        assert_eq!(metrics.total_claim_value, SampleFigures::total_value());
        assert_eq!(metrics.avg_claim_amount, dec!(2484.05));
        assert_eq!(metrics.overall_denial_rate, dec!(0.2));
        assert_eq!(metrics.avg_processing_days, Some(dec!(10.3)));
    }

    #[test]
    fn test_sample_metadata() {
        let report = ReportFixtures::sample_report();
        let meta = &report.executive_summary.report_metadata;
        assert_eq!(meta.generated_date, DateFixtures::report_date());
        assert_eq!(meta.coverage_period, "2009-01 to 2009-03");
        assert_eq!(meta.data_quality_score, dec!(100.0));
    }

    #[test]
    fn test_sample_distribution() {
        let report = ReportFixtures::sample_report();
        let shares = &report.executive_summary.claim_type_distribution;
        assert_eq!(shares[0].count, SampleFigures::INPATIENT_CLAIMS);
        assert_eq!(shares[0].total_value, SampleFigures::inpatient_value());
        assert_eq!(shares[1].avg_value, dec!(175.17));
        assert_eq!(shares[2].percentage, dec!(40.0));
    }

    #[test]
    fn test_sample_kpis() {
        let kpis = ReportFixtures::sample_report().executive_summary.kpi_categories;
        assert_eq!(kpis.financial.total_reimbursement, dec!(16750.50));
        assert_eq!(kpis.financial.cost_per_member, dec!(4968.10));
        assert_eq!(kpis.utilization.claims_per_member, dec!(2.00));
        assert_eq!(kpis.utilization.provider_diversity, 5);
        assert_eq!(kpis.utilization.members_with_claims, 5);
        assert_eq!(kpis.risk.high_risk_members, 1);
        assert_eq!(kpis.risk.high_cost_claims, 1);
        assert_eq!(kpis.risk.frequent_users, 0);
        assert_eq!(kpis.quality.data_quality_rate, dec!(1));
    }

    #[test]
    fn test_sample_financial_and_operational() {
        let report = ReportFixtures::sample_report();
        let months: Vec<&str> = report
            .financial_analysis
            .monthly_trends
            .iter()
            .map(|m| m.month.as_str())
            .collect();
        assert_eq!(months, vec!["2009-01", "2009-02", "2009-03"]);
        assert_eq!(report.financial_analysis.high_cost_analysis.threshold_amount, dec!(12000.00));

        let counts: Vec<u64> = report
            .operational_analysis
            .processing_efficiency
            .iter()
            .map(|b| b.count)
            .collect();
        assert_eq!(counts, vec![6, 2, 1, 1]);
    }

    #[test]
    fn test_sample_providers() {
        let report = ReportFixtures::sample_report();
        let top = &report.provider_analysis.top_providers;
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].npi.as_str(), "1003000126");
        assert_eq!(top[0].claims, 3);
        assert_eq!(top[0].performance_tier, PerformanceTier::NeedsImprovement);
        assert_eq!(top[1].name, "MERCY GENERAL HOSPITAL");

        let internal = report
            .provider_analysis
            .specialty_comparison
            .iter()
            .find(|s| s.specialty == "Internal Medicine")
            .unwrap();
        assert_eq!(internal.provider_count, 2);
        assert_eq!(internal.top_performers, 1);
    }

    #[test]
    fn test_sample_recommendations() {
        let recs = ReportFixtures::sample_report().recommendations;

        let providers = &recs.cost_optimization[0];
        assert_eq!(providers.affected, AffectedPopulation::Providers);
        assert_eq!(providers.affected_count, 2);

        let members = &recs.cost_optimization[1];
        assert_eq!(members.affected, AffectedPopulation::Members);
        assert_eq!(members.potential_savings, dec!(1811.32));

        assert_eq!(recs.quality_improvements[0].affected_count, 2);
        assert_eq!(recs.quality_improvements[1].metric.kind, MetricKind::DenialRate);
    }

    #[test]
    fn test_empty_dataset_report() {
        let report = ReportFixtures::empty_report();
        let metrics = &report.executive_summary.key_metrics;
        assert_eq!(metrics.total_claims, 0);
        assert_eq!(metrics.avg_claim_amount, Decimal::ZERO);
        assert_eq!(metrics.avg_processing_days, None);
        assert_eq!(report.executive_summary.report_metadata.coverage_period, "No dated claims");
        assert!(report.recommendations.cost_optimization.is_empty());
    }

    #[test]
    fn test_overflowing_claims_never_reach_the_aggregator() {
        let huge = dec!(50000000000000000000000000000);
        let result = DatasetBuilder::new()
            .with_typed_claims(ClaimType::Inpatient, &[huge, huge])
            .try_build();
        assert!(matches!(result, Err(ClaimDataError::AmountOutOfRange { .. })));
    }

    #[test]
    fn test_largest_allowed_amounts_aggregate() {
        let dataset = DatasetBuilder::new()
            .with_typed_claims(ClaimType::Inpatient, &[Money::MAX_AMOUNT; 4])
            .build();
        let report = ReportAggregator::new(ReportConfig::default())
            .unwrap()
            .generate(&dataset, DateFixtures::report_date())
            .unwrap();
        assert_eq!(
            report.executive_summary.key_metrics.total_claim_value,
            Money::MAX_AMOUNT * dec!(4)
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ReportConfig::default();
        config.providers.top_n = 0;
        assert!(matches!(
            ReportAggregator::new(config),
            Err(ReportError::InvalidConfig(_))
        ));
    }
}

// ============================================================================
// Document Tests
// ============================================================================

mod document_tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let report = ReportFixtures::sample_report();
        let json = report.to_json_pretty().unwrap();
        let parsed = ReportDocument::from_json(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_json_round_trip_keeps_every_digit() {
        let amount = dec!(123456789012345.67);
        let dataset = DatasetBuilder::new()
            .with_typed_claims(ClaimType::Outpatient, &[amount])
            .build();
        let report = ReportAggregator::new(ReportConfig::default())
            .unwrap()
            .generate(&dataset, DateFixtures::report_date())
            .unwrap();

        let json = report.to_json_pretty().unwrap();
        assert!(json.contains("123456789012345.67"));
        let parsed = ReportDocument::from_json(&json).unwrap();
        assert_eq!(parsed.executive_summary.key_metrics.total_claim_value, amount);
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_json_layout() {
        let json = ReportFixtures::sample_report_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        for section in ReportDocument::SECTIONS {
            assert!(value.get(section).is_some(), "missing section {}", section);
        }
        assert!(json.starts_with("{\n  \""));
        assert!(json.contains("Fast (≤7 days)"));

        let metrics = &value["executive_summary"]["key_metrics"];
        assert!(metrics["total_claim_value"].is_number());
        assert!(metrics["overall_denial_rate"].is_number());
        assert_eq!(value["member_risk_analysis"]["risk_stratification"][0]["tier"], "High Risk");
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let first = domain_reporting::serialize(&ReportFixtures::sample_report()).unwrap();
        let second = domain_reporting::serialize(&ReportFixtures::sample_report()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_schema_mismatch_is_serialization_error() {
        let result = ReportDocument::from_json(r#"{"executive_summary": 3}"#);
        assert!(matches!(result, Err(ReportError::Serialization(_))));
    }
}

// ============================================================================
// Invariant Tests
// ============================================================================

mod invariant_tests {
    use super::*;

    #[test]
    fn test_generated_reports_verify() {
        assert!(ReportFixtures::sample_report().verify().is_ok());
        assert!(ReportFixtures::empty_report().verify().is_ok());
    }

    #[test]
    fn test_tampered_claim_count_rejected() {
        let mut report = ReportFixtures::sample_report();
        report.executive_summary.key_metrics.total_claims += 1;
        assert!(matches!(
            report.verify(),
            Err(ReportError::InvariantViolation { check: "claim_type_counts", .. })
        ));
    }

    #[test]
    fn test_tampered_percentages_rejected() {
        let mut report = ReportFixtures::sample_report();
        report.executive_summary.claim_type_distribution[0].percentage += dec!(5);
        assert!(matches!(
            report.verify(),
            Err(ReportError::InvariantViolation { check: "claim_type_percentages", .. })
        ));
    }

    #[test]
    fn test_tampered_tier_counts_rejected() {
        let mut report = ReportFixtures::sample_report();
        report.member_risk_analysis.risk_stratification[2].count -= 1;
        assert!(matches!(
            report.verify(),
            Err(ReportError::InvariantViolation { check: "risk_tier_counts", .. })
        ));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn generated_reports_hold_invariants(dataset in dataset_strategy(12, 40)) {
            let aggregator = ReportAggregator::new(ReportConfig::default()).unwrap();
            let report = aggregator.generate(&dataset, DateFixtures::report_date()).unwrap();

            let summary = &report.executive_summary;
            assert_distribution_consistent(&summary.claim_type_distribution);
            assert_tiers_cover_members(
                &report.member_risk_analysis.risk_stratification,
                dataset.beneficiaries().len() as u64,
            );
            if !dataset.claims().is_empty() {
                assert_percentages_sum_to_100(
                    summary.claim_type_distribution.iter().map(|s| s.percentage),
                );
            }
        }

        #[test]
        fn json_round_trip_is_lossless(dataset in dataset_strategy(6, 20)) {
            let aggregator = ReportAggregator::new(ReportConfig::default()).unwrap();
            let report = aggregator.generate(&dataset, DateFixtures::report_date()).unwrap();
            let parsed = ReportDocument::from_json(&report.to_json_pretty().unwrap()).unwrap();
            prop_assert_eq!(parsed, report);
        }
    }
}
