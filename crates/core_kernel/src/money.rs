//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal for precise calculations without floating-point errors.
//! Claim payments are carried as `Money`; aggregations work on the
//! underlying `Decimal` amounts once the currency has been checked.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    JPY,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
            Currency::JPY => "¥",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::JPY => "JPY",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "CAD" => Ok(Currency::CAD),
            "AUD" => Ok(Currency::AUD),
            "JPY" => Ok(Currency::JPY),
            other => Err(MoneyError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount {0} exceeds the supported limit of {max}", max = Money::MAX_AMOUNT)]
    OutOfRange(Decimal),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

/// A monetary amount with associated currency
///
/// Amounts are stored with 4 decimal places internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Largest magnitude a single amount may carry.
    ///
    /// Report totals are plain `Decimal` sums, which panic on overflow.
    pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(4),
            currency,
        }
    }

    /// Parses a textual amount such as `"1234.50"` or `"$1,234.50"`
    pub fn parse(text: &str, currency: Currency) -> Result<Self, MoneyError> {
        let cleaned: String = text
            .trim()
            .chars()
            .filter(|c| !matches!(c, ',' | '$' | ' '))
            .collect();
        if cleaned.is_empty() {
            return Err(MoneyError::InvalidAmount("empty amount".to_string()));
        }
        let amount = Decimal::from_str(&cleaned)
            .or_else(|_| Decimal::from_scientific(&cleaned))
            .map_err(|_| MoneyError::InvalidAmount(text.to_string()))?;
        let money = Self::new(amount, currency);
        money.ensure_in_range()?;
        Ok(money)
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Fails when the amount's magnitude is above [`Money::MAX_AMOUNT`]
    pub fn ensure_in_range(&self) -> Result<(), MoneyError> {
        if self.amount.abs() > Self::MAX_AMOUNT {
            return Err(MoneyError::OutOfRange(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}

/// A rate expressed as a fraction (e.g., 0.023 for a 2.3% denial rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate {
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a percentage (e.g., 5.0 for 5%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// `numerator / denominator`, or a zero rate when the denominator is zero
    pub fn from_ratio(numerator: Decimal, denominator: Decimal) -> Self {
        if denominator.is_zero() {
            return Self::zero();
        }
        Self {
            value: numerator / denominator,
        }
    }

    /// Rate of `part` out of `whole` counts
    pub fn from_counts(part: usize, whole: usize) -> Self {
        Self::from_ratio(Decimal::from(part), Decimal::from(whole))
    }

    /// The zero rate
    pub fn zero() -> Self {
        Self { value: dec!(0) }
    }

    /// Rounds the fraction to `dp` decimal places
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            value: self.value.round_dp(dp),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.value * dec!(100)).round_dp(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let m = Money::new(dec!(100.50), Currency::USD);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::USD);
    }

    #[test]
    fn test_money_parse_strips_symbols() {
        let m = Money::parse("$1,234.50", Currency::USD).unwrap();
        assert_eq!(m.amount(), dec!(1234.50));
    }

    #[test]
    fn test_money_parse_rejects_garbage() {
        assert!(matches!(
            Money::parse("twelve", Currency::USD),
            Err(MoneyError::InvalidAmount(_))
        ));
        assert!(Money::parse("   ", Currency::USD).is_err());
    }

    #[test]
    fn test_money_parse_rejects_huge_amounts() {
        assert!(matches!(
            Money::parse("5e28", Currency::USD),
            Err(MoneyError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("-1000000000000000.01", Currency::USD),
            Err(MoneyError::OutOfRange(_))
        ));
        assert!(Money::parse("1000000000000000", Currency::USD).is_ok());
    }

    #[test]
    fn test_rate_from_zero_denominator() {
        let rate = Rate::from_counts(3, 0);
        assert_eq!(rate, Rate::zero());
    }

    #[test]
    fn test_rate_from_percentage() {
        assert_eq!(Rate::from_percentage(dec!(5.0)).as_decimal(), dec!(0.05));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn parsed_cents_round_trip(cents in 0i64..10_000_000_000i64) {
            let amount = Decimal::new(cents, 2);
            let parsed = Money::parse(&amount.to_string(), Currency::USD).unwrap();
            prop_assert_eq!(parsed.amount(), amount);
        }

        #[test]
        fn rate_from_counts_is_a_fraction(
            whole in 1usize..10_000usize,
            part_seed in 0usize..10_000usize
        ) {
            let part = part_seed % (whole + 1);
            let rate = Rate::from_counts(part, whole);
            prop_assert!(rate.as_decimal() >= dec!(0));
            prop_assert!(rate.as_decimal() <= dec!(1));
        }
    }
}
