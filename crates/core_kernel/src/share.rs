//! Percentage shares, averages, and percentiles over decimal samples
//!
//! Distributions in the reports are rounded with the largest-remainder
//! method so that the published percentages of one distribution always
//! add up to exactly 100.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// `part / whole * 100` rounded to `dp` places, zero when `whole` is zero
pub fn percentage_of(part: Decimal, whole: Decimal, dp: u32) -> Decimal {
    if whole.is_zero() {
        return dec!(0);
    }
    (part / whole * dec!(100)).round_dp(dp)
}

/// `total / count` rounded to `dp` places, zero when `count` is zero
pub fn average(total: Decimal, count: usize, dp: u32) -> Decimal {
    if count == 0 {
        return dec!(0);
    }
    (total / Decimal::from(count)).round_dp(dp)
}

/// Splits 100 percent across `weights` proportionally.
///
/// Each share is rounded to `dp` places and the rounding slack is handed to
/// the entries with the largest remainders (ties go to the earlier entry),
/// so the result sums to exactly 100 whenever the weights have a positive
/// total. Negative weights count as zero. Returns all zeros otherwise.
pub fn largest_remainder_percentages(weights: &[Decimal], dp: u32) -> Vec<Decimal> {
    let clamped: Vec<Decimal> = weights.iter().map(|w| (*w).max(dec!(0))).collect();
    let total: Decimal = clamped.iter().sum();
    if total <= dec!(0) {
        return vec![dec!(0); weights.len()];
    }

    let scale = Decimal::from(10_u64.pow(dp));
    let target_units = dec!(100) * scale;

    let exact: Vec<Decimal> = clamped.iter().map(|w| *w / total * target_units).collect();
    let mut units: Vec<Decimal> = exact.iter().map(|e| e.floor()).collect();

    let assigned: Decimal = units.iter().sum();
    let mut leftover = (target_units - assigned).to_i64().unwrap_or(0);

    let mut order: Vec<usize> = (0..exact.len()).collect();
    order.sort_by(|a, b| {
        let ra = exact[*a] - units[*a];
        let rb = exact[*b] - units[*b];
        rb.cmp(&ra).then(a.cmp(b))
    });

    for idx in order {
        if leftover <= 0 {
            break;
        }
        if clamped[idx].is_zero() {
            continue;
        }
        units[idx] += dec!(1);
        leftover -= 1;
    }

    units.into_iter().map(|u| (u / scale).round_dp(dp)).collect()
}

/// Nearest-rank percentile of an ascending-sorted sample.
///
/// Returns the value at position `ceil(percentile / 100 * n)` (1-based),
/// clamped to the sample bounds, or `None` for an empty sample.
pub fn nearest_rank(sorted: &[Decimal], percentile: Decimal) -> Option<Decimal> {
    if sorted.is_empty() {
        return None;
    }
    let n = sorted.len();
    let rank = (percentile / dec!(100) * Decimal::from(n))
        .ceil()
        .to_usize()
        .unwrap_or(1)
        .clamp(1, n);
    Some(sorted[rank - 1])
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn shares_sum_to_one_hundred(
            weights in proptest::collection::vec(0u32..100_000u32, 1..12)
        ) {
            let weights: Vec<Decimal> = weights.into_iter().map(Decimal::from).collect();
            let shares = largest_remainder_percentages(&weights, 1);
            let total: Decimal = weights.iter().sum();
            let sum: Decimal = shares.iter().sum();
            if total.is_zero() {
                prop_assert_eq!(sum, dec!(0));
            } else {
                prop_assert_eq!(sum, dec!(100));
            }
        }
    }
}
