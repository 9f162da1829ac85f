//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating claims data that respects
//! the dataset invariants: one currency, claims linked to known members.

use core_kernel::{ClaimId, Currency, MemberId, Money, ProviderId};
use domain_claims::{BeneficiaryRecord, ChronicCondition, ClaimRecord, ClaimType, ClaimsDataset};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for claim types
pub fn claim_type_strategy() -> impl Strategy<Value = ClaimType> {
    prop_oneof![
        Just(ClaimType::Inpatient),
        Just(ClaimType::Outpatient),
        Just(ClaimType::Carrier),
    ]
}

/// Strategy for non-negative payment amounts in cents (up to $50,000)
pub fn payment_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..5_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a set of chronic conditions
pub fn chronic_conditions_strategy() -> impl Strategy<Value = Vec<ChronicCondition>> {
    proptest::sample::subsequence(ChronicCondition::ALL.to_vec(), 0..=ChronicCondition::ALL.len())
}

/// Strategy for one claim of member `M{0..members}`
pub fn claim_strategy(members: usize) -> impl Strategy<Value = (usize, ClaimType, Decimal, Option<u32>, bool, u8)> {
    (
        0..members.max(1),
        claim_type_strategy(),
        payment_amount_strategy(),
        proptest::option::of(0u32..60u32),
        proptest::bool::weighted(0.1),
        0u8..6u8,
    )
}

/// Strategy for a complete USD dataset with up to `max_members` members
/// and up to `max_claims` claims
pub fn dataset_strategy(max_members: usize, max_claims: usize) -> impl Strategy<Value = ClaimsDataset> {
    (1..=max_members.max(1))
        .prop_flat_map(move |members| {
            (
                proptest::collection::vec(chronic_conditions_strategy(), members),
                proptest::collection::vec(claim_strategy(members), 0..=max_claims),
            )
        })
        .prop_map(|(conditions, claims)| {
            let beneficiaries: Vec<BeneficiaryRecord> = conditions
                .into_iter()
                .enumerate()
                .map(|(i, conds)| {
                    conds
                        .into_iter()
                        .fold(BeneficiaryRecord::new(MemberId::new(format!("M{:04}", i))), |m, c| {
                            m.with_condition(c)
                        })
                })
                .collect();

            let claims: Vec<ClaimRecord> = claims
                .into_iter()
                .enumerate()
                .map(|(i, (member, claim_type, amount, days, denied, provider))| {
                    let mut claim = ClaimRecord::new(
                        ClaimId::new(format!("C{:05}", i)),
                        MemberId::new(format!("M{:04}", member)),
                        claim_type,
                        Money::new(amount, Currency::USD),
                    )
                    .with_denial(denied)
                    .with_provider(ProviderId::new(format!("P{}", provider)));
                    if let Some(days) = days {
                        claim = claim.with_processing_days(days);
                    }
                    claim
                })
                .collect();

            ClaimsDataset::new(Currency::USD, claims, Vec::new(), beneficiaries)
                .expect("generated claims are all USD")
        })
}
