//! Reporting domain errors

use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur while building or exchanging a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report invariant '{check}' violated: {detail}")]
    InvariantViolation { check: &'static str, detail: String },

    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),

    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl ReportError {
    pub fn violation(check: &'static str, detail: impl Into<String>) -> Self {
        ReportError::InvariantViolation {
            check,
            detail: detail.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        ReportError::InvalidConfig(message.into())
    }
}
