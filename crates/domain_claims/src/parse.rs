//! Conversions from raw seed-file values
//!
//! The warehouse seed files follow the CMS synthetic public use file
//! conventions: dates are `YYYYMMDD`, condition flags are `1` (yes) /
//! `2` (no), and numeric columns sometimes carry a trailing `.0`.

use chrono::NaiveDate;
use std::str::FromStr;

use core_kernel::{Currency, Money};
use crate::error::ClaimDataError;

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn strip_zero_fraction(value: &str) -> &str {
    value.strip_suffix(".0").unwrap_or(value)
}

/// Returns the trimmed value or a `MissingField` error
pub fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ClaimDataError> {
    present(value).ok_or(ClaimDataError::MissingField(field))
}

/// Parses a payment amount; an empty cell is a missing field
pub fn parse_amount(
    field: &'static str,
    value: Option<&str>,
    currency: Currency,
) -> Result<Money, ClaimDataError> {
    let raw = required(field, value)?;
    Money::parse(raw, currency).map_err(|_| ClaimDataError::InvalidAmount {
        field,
        value: raw.to_string(),
    })
}

/// Parses an optional `YYYYMMDD` (or ISO `YYYY-MM-DD`) date
pub fn parse_seed_date(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>, ClaimDataError> {
    let Some(raw) = present(value) else {
        return Ok(None);
    };
    let digits = strip_zero_fraction(raw);
    NaiveDate::parse_from_str(digits, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(digits, "%Y-%m-%d"))
        .map(Some)
        .map_err(|_| ClaimDataError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}

/// Parses an optional denial indicator; absent means paid
pub fn parse_denial_flag(field: &'static str, value: Option<&str>) -> Result<bool, ClaimDataError> {
    let Some(raw) = present(value) else {
        return Ok(false);
    };
    match strip_zero_fraction(raw).to_ascii_uppercase().as_str() {
        "Y" | "YES" | "1" | "TRUE" | "D" => Ok(true),
        "N" | "NO" | "0" | "FALSE" | "P" => Ok(false),
        _ => Err(ClaimDataError::InvalidFlag {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Parses a chronic condition flag: `1` = present, `2`/`0`/empty = absent
pub fn parse_condition_flag(field: &'static str, value: Option<&str>) -> Result<bool, ClaimDataError> {
    let Some(raw) = present(value) else {
        return Ok(false);
    };
    match strip_zero_fraction(raw) {
        "1" => Ok(true),
        "2" | "0" => Ok(false),
        _ => Err(ClaimDataError::InvalidFlag {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Parses an optional non-negative day count
pub fn parse_days(field: &'static str, value: Option<&str>) -> Result<Option<u32>, ClaimDataError> {
    let Some(raw) = present(value) else {
        return Ok(None);
    };
    u32::from_str(strip_zero_fraction(raw))
        .map(Some)
        .map_err(|_| ClaimDataError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_seed_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2009, 1, 4);
        assert_eq!(parse_seed_date("clm_from_dt", Some("20090104")).unwrap(), expected);
        assert_eq!(parse_seed_date("clm_from_dt", Some("20090104.0")).unwrap(), expected);
        assert_eq!(parse_seed_date("clm_from_dt", Some("2009-01-04")).unwrap(), expected);
        assert_eq!(parse_seed_date("clm_from_dt", Some("")).unwrap(), None);
        assert!(parse_seed_date("clm_from_dt", Some("2009/01/04")).is_err());
    }

    #[test]
    fn test_parse_amount_requires_value() {
        assert!(matches!(
            parse_amount("clm_pmt_amt", Some(" "), Currency::USD),
            Err(ClaimDataError::MissingField("clm_pmt_amt"))
        ));
        let m = parse_amount("clm_pmt_amt", Some("4000.0"), Currency::USD).unwrap();
        assert_eq!(m.amount(), dec!(4000));
    }

    #[test]
    fn test_parse_amount_rejects_overflowing_values() {
        assert!(matches!(
            parse_amount("clm_pmt_amt", Some("5e28"), Currency::USD),
            Err(ClaimDataError::InvalidAmount { field: "clm_pmt_amt", .. })
        ));
    }

    #[test]
    fn test_flags() {
        assert!(parse_denial_flag("clm_denied_ind", Some("y")).unwrap());
        assert!(!parse_denial_flag("clm_denied_ind", None).unwrap());
        assert!(parse_denial_flag("clm_denied_ind", Some("maybe")).is_err());
        assert!(parse_condition_flag("sp_chf", Some("1")).unwrap());
        assert!(!parse_condition_flag("sp_chf", Some("2")).unwrap());
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days("clm_prcsg_days", Some("12")).unwrap(), Some(12));
        assert_eq!(parse_days("clm_prcsg_days", Some("12.0")).unwrap(), Some(12));
        assert!(parse_days("clm_prcsg_days", Some("-3")).is_err());
    }
}
