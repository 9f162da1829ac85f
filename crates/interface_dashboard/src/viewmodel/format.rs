//! Display formatting for report values
//!
//! Report percentages are already 0-100; rates are 0-1 fractions and are
//! scaled here. Missing values print the configured "not available" label.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use core_kernel::Currency;
use crate::config::DisplayConfig;

const THOUSAND: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);
const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Formats report values for one document's currency
#[derive(Debug, Clone)]
pub struct Formatter<'a> {
    display: &'a DisplayConfig,
    symbol: String,
}

impl<'a> Formatter<'a> {
    pub fn new(display: &'a DisplayConfig, currency: Currency) -> Self {
        Self {
            display,
            symbol: display.currency_symbol(currency),
        }
    }

    pub fn display(&self) -> &'a DisplayConfig {
        self.display
    }

    pub fn not_available(&self) -> String {
        self.display.not_available.clone()
    }

    /// `$12,345.60`
    pub fn money(&self, value: Decimal) -> String {
        let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
        format!("{}{}{}", sign, self.symbol, grouped(value.abs(), 2))
    }

    /// `$1.2M`, `$24.8K`, or the full amount below a thousand
    pub fn money_compact(&self, value: Decimal) -> String {
        let magnitude = value.abs();
        let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
        if magnitude >= MILLION {
            format!("{}{}{}M", sign, self.symbol, fixed(magnitude / MILLION, 1))
        } else if magnitude >= THOUSAND {
            format!("{}{}{}K", sign, self.symbol, fixed(magnitude / THOUSAND, 1))
        } else {
            self.money(value)
        }
    }

    /// `1,234`
    pub fn count(&self, value: u64) -> String {
        grouped(Decimal::from(value), 0)
    }

    /// A 0-100 percentage: `30.0%`
    pub fn percent(&self, value: Decimal) -> String {
        format!("{}%", fixed(value, 1))
    }

    /// A 0-1 rate as a percentage: `20.0%`
    pub fn rate(&self, value: Decimal) -> String {
        self.percent(value * HUNDRED)
    }

    /// A 0-1 rate with two decimals: `2.50%`
    pub fn rate_precise(&self, value: Decimal) -> String {
        format!("{}%", fixed(value * HUNDRED, 2))
    }

    /// `10.3 days`
    pub fn days(&self, value: Option<Decimal>) -> String {
        match value {
            Some(days) => format!("{} days", fixed(days, 1)),
            None => self.not_available(),
        }
    }

    /// A plain number with `dp` decimals
    pub fn number(&self, value: Decimal, dp: u32) -> String {
        grouped(value, dp)
    }
}

/// Rounds to `dp` places and pads with trailing zeros
pub fn fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, value.round_dp(dp))
}

/// [`fixed`] with thousands separators in the integer part
pub fn grouped(value: Decimal, dp: u32) -> String {
    let text = fixed(value, dp);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(text.len() + integer.len() / 3);
    out.push_str(sign);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Lossy conversion for chart geometry
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn with<F: FnOnce(&Formatter<'_>)>(check: F) {
        let display = DisplayConfig::default();
        check(&Formatter::new(&display, Currency::USD));
    }

    #[test]
    fn test_money() {
        with(|f| {
            assert_eq!(f.money(dec!(24840.5)), "$24,840.50");
            assert_eq!(f.money(dec!(0)), "$0.00");
            assert_eq!(f.money(dec!(-1234567.891)), "-$1,234,567.89");
        });
    }

    #[test]
    fn test_money_compact() {
        with(|f| {
            assert_eq!(f.money_compact(dec!(24840.5)), "$24.8K");
            assert_eq!(f.money_compact(dec!(2500000)), "$2.5M");
            assert_eq!(f.money_compact(dec!(175.17)), "$175.17");
        });
    }

    #[test]
    fn test_rates_and_percentages() {
        with(|f| {
            assert_eq!(f.rate(dec!(0.2)), "20.0%");
            assert_eq!(f.rate_precise(dec!(0.025)), "2.50%");
            assert_eq!(f.percent(dec!(30)), "30.0%");
        });
    }

    #[test]
    fn test_days_fallback() {
        with(|f| {
            assert_eq!(f.days(Some(dec!(10.25))), "10.2 days");
            assert_eq!(f.days(None), "N/A");
        });
    }

    #[test]
    fn test_grouping() {
        assert_eq!(grouped(dec!(999), 0), "999");
        assert_eq!(grouped(dec!(1000), 0), "1,000");
        assert_eq!(grouped(dec!(123456.7), 1), "123,456.7");
    }
}
