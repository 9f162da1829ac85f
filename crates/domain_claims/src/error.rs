//! Claims domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{CoreError, MoneyError};

/// Errors raised while turning raw seed values into domain records
#[derive(Debug, Error)]
pub enum ClaimDataError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid amount in {field}: {value:?}")]
    InvalidAmount { field: &'static str, value: String },

    #[error("Invalid date in {field}: {value:?} (expected YYYYMMDD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("Invalid flag in {field}: {value:?}")]
    InvalidFlag { field: &'static str, value: String },

    #[error("Invalid number in {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Claim {claim} is in {found}, dataset currency is {expected}")]
    CurrencyMismatch {
        claim: String,
        found: String,
        expected: String,
    },

    #[error("Claim {claim} pays {amount}, above the supported per-claim limit")]
    AmountOutOfRange { claim: String, amount: Decimal },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Money(#[from] MoneyError),
}
