//! Unit tests for the Money, Rate, and share helpers
//!
//! Tests cover money creation and parsing, the amount limit,
//! rates, and the percentage helpers the reports rely on.

use core_kernel::{
    average, largest_remainder_percentages, nearest_rank, percentage_of,
    Currency, Money, MoneyError, Rate,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_creates_money_with_correct_amount() {
        let m = Money::new(dec!(100.50), Currency::USD);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::USD);
    }

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789), Currency::USD);
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_parse_plain_and_formatted_amounts() {
        assert_eq!(Money::parse("4000", Currency::USD).unwrap().amount(), dec!(4000));
        assert_eq!(Money::parse("4000.00", Currency::USD).unwrap().amount(), dec!(4000));
        assert_eq!(Money::parse(" 1,250.5 ", Currency::USD).unwrap().amount(), dec!(1250.5));
    }

    #[test]
    fn test_parse_scientific_notation() {
        let m = Money::parse("1.5e3", Currency::USD).unwrap();
        assert_eq!(m.amount(), dec!(1500));
    }

    #[test]
    fn test_parse_rejects_amounts_past_the_limit() {
        assert!(matches!(
            Money::parse("7.9e28", Currency::USD),
            Err(MoneyError::OutOfRange(_))
        ));
        let limit = Money::new(Money::MAX_AMOUNT, Currency::USD);
        assert!(limit.ensure_in_range().is_ok());
    }
}

mod display {
    use super::*;

    #[test]
    fn test_display_uses_symbol_and_currency_places() {
        let m = Money::new(dec!(15847), Currency::USD);
        assert_eq!(m.to_string(), "$ 15847.00");
        let yen = Money::new(dec!(1200), Currency::JPY);
        assert_eq!(yen.to_string(), "¥ 1200");
    }
}

mod currency {
    use super::*;

    #[test]
    fn test_parse_currency_code() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::USD);
        assert!(matches!("XYZ".parse::<Currency>(), Err(MoneyError::UnknownCurrency(_))));
    }

    #[test]
    fn test_currency_serializes_uppercase() {
        let json = serde_json::to_string(&Currency::EUR).unwrap();
        assert_eq!(json, "\"EUR\"");
    }
}

mod rates {
    use super::*;

    #[test]
    fn test_rate_from_counts_and_rounding() {
        let rate = Rate::from_counts(1, 3).rounded(4);
        assert_eq!(rate.as_decimal(), dec!(0.3333));
        assert_eq!(rate.to_string(), "33.33%");
    }

    #[test]
    fn test_rate_from_ratio_zero_denominator() {
        assert_eq!(Rate::from_ratio(dec!(5), dec!(0)), Rate::zero());
    }
}

mod shares {
    use super::*;

    #[test]
    fn test_percentage_and_average_helpers() {
        assert_eq!(percentage_of(dec!(3), dec!(10), 1), dec!(30.0));
        assert_eq!(average(dec!(600), 3, 2), dec!(200));
        assert_eq!(average(dec!(600), 0, 2), dec!(0));
    }

    #[test]
    fn test_largest_remainder_matches_exact_shares() {
        let shares = largest_remainder_percentages(&[dec!(3), dec!(5), dec!(2)], 1);
        assert_eq!(shares, vec![dec!(30.0), dec!(50.0), dec!(20.0)]);
    }

    #[test]
    fn test_largest_remainder_sums_to_one_hundred() {
        let shares = largest_remainder_percentages(&[dec!(8920), dec!(23410), dec!(17670)], 1);
        let sum: Decimal = shares.iter().sum();
        assert_eq!(sum, dec!(100));
    }

    #[test]
    fn test_nearest_rank_on_single_value() {
        assert_eq!(nearest_rank(&[dec!(42)], dec!(95)), Some(dec!(42)));
    }
}
