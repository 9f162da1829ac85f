//! Claim-type distribution

use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::{average, largest_remainder_percentages, Rate};
use domain_claims::{ClaimRecord, ClaimType};
use crate::document::{ClaimTypeShare, MONEY_DP, PERCENT_DP, RATE_DP};

/// Count, value and denial rate per claim type.
///
/// Always returns the three types in Inpatient, Outpatient, Carrier order.
/// Percentages are shares of the claim count and sum to exactly 100.0 when
/// there is at least one claim; a type with no claims reports zeros.
pub fn compute_claim_type_distribution(claims: &[ClaimRecord]) -> Vec<ClaimTypeShare> {
    let tallies: Vec<(ClaimType, usize, Decimal, usize)> = ClaimType::ALL
        .iter()
        .map(|claim_type| {
            let of_type = claims.iter().filter(|c| c.claim_type == *claim_type);
            let (count, total, denied) = of_type.fold(
                (0usize, Decimal::ZERO, 0usize),
                |(count, total, denied), claim| {
                    (count + 1, total + claim.amount(), denied + usize::from(claim.denied))
                },
            );
            (*claim_type, count, total, denied)
        })
        .collect();

    let weights: Vec<Decimal> = tallies.iter().map(|(_, count, _, _)| Decimal::from(*count)).collect();
    let percentages = largest_remainder_percentages(&weights, PERCENT_DP);

    tallies
        .into_iter()
        .zip(percentages)
        .map(|((claim_type, count, total, denied), percentage)| {
            let total_value = total.round_dp(MONEY_DP);
            debug!(%claim_type, count, %total_value, "Claim type tallied");
            ClaimTypeShare {
                claim_type,
                count: count as u64,
                percentage,
                total_value,
                avg_value: average(total, count, MONEY_DP),
                denial_rate: Rate::from_counts(denied, count).rounded(RATE_DP).as_decimal(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ClaimId, Currency, MemberId, Money};
    use rust_decimal_macros::dec;

    fn claim(n: usize, claim_type: ClaimType, amount: Decimal) -> ClaimRecord {
        ClaimRecord::new(
            ClaimId::new(format!("C{}", n)),
            MemberId::new("M1"),
            claim_type,
            Money::new(amount, Currency::USD),
        )
    }

    #[test]
    fn test_three_of_ten_inpatient() {
        let mut claims = vec![
            claim(1, ClaimType::Inpatient, dec!(100)),
            claim(2, ClaimType::Inpatient, dec!(200)),
            claim(3, ClaimType::Inpatient, dec!(300)),
        ];
        for n in 4..=10 {
            claims.push(claim(n, ClaimType::Carrier, dec!(50)));
        }

        let shares = compute_claim_type_distribution(&claims);
        let inpatient = &shares[0];
        assert_eq!(inpatient.claim_type, ClaimType::Inpatient);
        assert_eq!(inpatient.count, 3);
        assert_eq!(inpatient.percentage, dec!(30.0));
        assert_eq!(inpatient.avg_value, dec!(200.00));
        assert_eq!(inpatient.total_value, dec!(600.00));
    }

    #[test]
    fn test_missing_type_reports_zeros() {
        let claims = vec![claim(1, ClaimType::Carrier, dec!(10))];
        let shares = compute_claim_type_distribution(&claims);
        assert_eq!(shares.len(), 3);
        let outpatient = &shares[1];
        assert_eq!(outpatient.count, 0);
        assert_eq!(outpatient.percentage, dec!(0));
        assert_eq!(outpatient.avg_value, dec!(0));
        assert_eq!(outpatient.denial_rate, dec!(0));
        assert_eq!(shares[2].percentage, dec!(100.0));
    }

    #[test]
    fn test_denial_rate_per_type() {
        let claims = vec![
            claim(1, ClaimType::Outpatient, dec!(10)).with_denial(true),
            claim(2, ClaimType::Outpatient, dec!(10)),
            claim(3, ClaimType::Outpatient, dec!(10)),
            claim(4, ClaimType::Outpatient, dec!(10)),
        ];
        let shares = compute_claim_type_distribution(&claims);
        assert_eq!(shares[1].denial_rate, dec!(0.25));
    }
}
