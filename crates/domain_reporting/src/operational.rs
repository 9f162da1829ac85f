//! Claim processing efficiency

use rust_decimal::Decimal;

use core_kernel::{average, largest_remainder_percentages, Rate};
use domain_claims::ClaimRecord;
use crate::document::{ProcessingBucket, AVERAGE_DP, PERCENT_DP, RATE_DP};

/// Processing-time buckets: label and inclusive day range
pub const PROCESSING_BUCKETS: [(&str, u32, u32); 4] = [
    ("Fast (≤7 days)", 0, 7),
    ("Normal (8-14 days)", 8, 14),
    ("Slow (15-30 days)", 15, 30),
    ("Very Slow (>30 days)", 31, u32::MAX),
];

/// Buckets claims that carry a processing duration.
///
/// All four buckets are always emitted; percentages sum to exactly 100.0
/// when at least one claim has a duration.
pub fn compute_processing_efficiency(claims: &[ClaimRecord]) -> Vec<ProcessingBucket> {
    let tallies: Vec<(usize, u64, usize)> = PROCESSING_BUCKETS
        .iter()
        .map(|(_, low, high)| {
            claims
                .iter()
                .filter_map(|c| c.processing_days.map(|d| (d, c.denied)))
                .filter(|(d, _)| d >= low && d <= high)
                .fold((0usize, 0u64, 0usize), |(count, days, denied), (d, was_denied)| {
                    (count + 1, days + u64::from(d), denied + usize::from(was_denied))
                })
        })
        .collect();

    let weights: Vec<Decimal> = tallies.iter().map(|(count, _, _)| Decimal::from(*count)).collect();
    let percentages = largest_remainder_percentages(&weights, PERCENT_DP);

    PROCESSING_BUCKETS
        .iter()
        .zip(tallies)
        .zip(percentages)
        .map(|(((label, _, _), (count, days, denied)), percentage)| ProcessingBucket {
            category: label.to_string(),
            count: count as u64,
            percentage,
            avg_days: average(Decimal::from(days), count, AVERAGE_DP),
            denial_rate: Rate::from_counts(denied, count).rounded(RATE_DP).as_decimal(),
        })
        .collect()
}

/// Mean processing days over claims that carry a duration
pub fn average_processing_days(claims: &[ClaimRecord]) -> Option<Decimal> {
    let durations: Vec<u64> = claims
        .iter()
        .filter_map(|c| c.processing_days.map(u64::from))
        .collect();
    if durations.is_empty() {
        return None;
    }
    Some(average(Decimal::from(durations.iter().sum::<u64>()), durations.len(), AVERAGE_DP))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ClaimId, Currency, MemberId, Money};
    use domain_claims::ClaimType;
    use rust_decimal_macros::dec;

    fn claim(n: u32, days: Option<u32>) -> ClaimRecord {
        let c = ClaimRecord::new(
            ClaimId::new(format!("C{}", n)),
            MemberId::new("M1"),
            ClaimType::Outpatient,
            Money::new(dec!(10), Currency::USD),
        );
        match days {
            Some(d) => c.with_processing_days(d),
            None => c,
        }
    }

    #[test]
    fn test_bucket_boundaries() {
        let claims = vec![
            claim(1, Some(7)),
            claim(2, Some(8)),
            claim(3, Some(14)),
            claim(4, Some(30)),
            claim(5, Some(31)),
            claim(6, None),
        ];
        let buckets = compute_processing_efficiency(&claims);
        let counts: Vec<u64> = buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 2, 1, 1]);
        assert_eq!(buckets.iter().map(|b| b.percentage).sum::<Decimal>(), dec!(100.0));
        assert_eq!(buckets[1].avg_days, dec!(11.0));
    }

    #[test]
    fn test_no_durations() {
        let buckets = compute_processing_efficiency(&[claim(1, None)]);
        assert_eq!(buckets.len(), 4);
        assert!(buckets.iter().all(|b| b.count == 0 && b.percentage.is_zero()));
        assert_eq!(average_processing_days(&[claim(1, None)]), None);
    }

    #[test]
    fn test_average_processing_days() {
        let claims = vec![claim(1, Some(3)), claim(2, Some(4))];
        assert_eq!(average_processing_days(&claims), Some(dec!(3.5)));
    }
}
