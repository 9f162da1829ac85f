//! File layer error types
//!
//! A missing seed file or an unreadable CSV stream aborts loading. Rows that
//! cannot be converted into records are not errors at this level; the
//! loader skips and counts them.

use std::path::{Path, PathBuf};
use thiserror::Error;

use domain_claims::ClaimDataError;
use domain_reporting::ReportError;

/// Errors that can occur while reading seeds or writing reports
#[derive(Debug, Error)]
pub enum SeedError {
    /// A required seed file does not exist
    #[error("Seed file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A seed file lacks a required column
    #[error("Seed file {file} is missing required column '{column}'")]
    MissingColumn { file: String, column: &'static str },

    /// The CSV stream itself could not be read
    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Loaded records do not form a valid dataset
    #[error("Invalid seed data: {0}")]
    Data(#[from] ClaimDataError),

    /// The report could not be serialized
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl SeedError {
    pub fn file_not_found(path: &Path) -> Self {
        SeedError::FileNotFound {
            path: path.to_path_buf(),
        }
    }

    pub fn csv(file: &str, source: csv::Error) -> Self {
        SeedError::Csv {
            file: file.to_string(),
            source,
        }
    }

    /// Checks if this error indicates a missing input file
    pub fn is_not_found(&self) -> bool {
        matches!(self, SeedError::FileNotFound { .. })
    }
}
