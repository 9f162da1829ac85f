//! Per-member cost and utilization profiles

use rust_decimal::Decimal;

use core_kernel::MemberId;
use domain_claims::ClaimsDataset;

/// A covered member joined with the claims filed for them
#[derive(Debug, Clone, PartialEq)]
pub struct MemberProfile {
    pub id: MemberId,
    pub chronic_conditions: usize,
    pub claims: usize,
    pub denied_claims: usize,
    /// Sum of payments on the member's claims; this is the risk score
    pub annual_cost: Decimal,
}

impl MemberProfile {
    /// A member with no claims
    pub fn new(id: MemberId, chronic_conditions: usize) -> Self {
        Self {
            id,
            chronic_conditions,
            claims: 0,
            denied_claims: 0,
            annual_cost: Decimal::ZERO,
        }
    }
}

/// One profile per beneficiary, in beneficiary file order.
///
/// Claims whose member id has no beneficiary row do not contribute to any
/// profile.
pub fn build_member_profiles(dataset: &ClaimsDataset) -> Vec<MemberProfile> {
    let by_member = dataset.claims_by_member();

    dataset
        .beneficiaries()
        .iter()
        .map(|bene| {
            let mut profile = MemberProfile::new(bene.id.clone(), bene.condition_count());
            if let Some(claims) = by_member.get(&bene.id) {
                profile.claims = claims.len();
                profile.denied_claims = claims.iter().filter(|c| c.denied).count();
                profile.annual_cost = claims.iter().map(|c| c.amount()).sum();
            }
            profile
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ClaimId, Currency, Money};
    use domain_claims::{BeneficiaryRecord, ChronicCondition, ClaimRecord, ClaimType};
    use rust_decimal_macros::dec;

    #[test]
    fn test_profiles_join_claims_by_member() {
        let claims = vec![
            ClaimRecord::new(ClaimId::new("C1"), MemberId::new("M1"), ClaimType::Inpatient, Money::new(dec!(1000), Currency::USD)),
            ClaimRecord::new(ClaimId::new("C2"), MemberId::new("M1"), ClaimType::Carrier, Money::new(dec!(50), Currency::USD))
                .with_denial(true),
            ClaimRecord::new(ClaimId::new("C3"), MemberId::new("GHOST"), ClaimType::Carrier, Money::new(dec!(75), Currency::USD)),
        ];
        let members = vec![
            BeneficiaryRecord::new(MemberId::new("M1")).with_condition(ChronicCondition::Diabetes),
            BeneficiaryRecord::new(MemberId::new("M2")),
        ];
        let dataset = ClaimsDataset::new(Currency::USD, claims, vec![], members).unwrap();

        let profiles = build_member_profiles(&dataset);
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].claims, 2);
        assert_eq!(profiles[0].denied_claims, 1);
        assert_eq!(profiles[0].annual_cost, dec!(1050));
        assert_eq!(profiles[0].chronic_conditions, 1);
        assert_eq!(profiles[1].claims, 0);
        assert_eq!(profiles[1].annual_cost, dec!(0));
    }
}
