//! Infrastructure File Layer
//!
//! Reads the warehouse seed CSV files into a `ClaimsDataset` and writes
//! generated reports to the output directory.
//!
//! # Seed Files
//!
//! | file | records |
//! |------|---------|
//! | `sample_inpatient_claims.csv` | inpatient claims |
//! | `sample_outpatient_claims.csv` | outpatient claims |
//! | `sample_carrier_claims.csv` | carrier claims |
//! | `sample_provider_data.csv` | billing providers |
//! | `sample_beneficiary_summary.csv` | covered members |
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_files::{ReportWriter, SeedLoader};
//!
//! let dataset = SeedLoader::new("seeds", Currency::USD).load()?;
//! let document = aggregator.generate(&dataset, as_of)?;
//! ReportWriter::new("reports").write_json(&document)?;
//! ```

pub mod error;
pub mod rows;
pub mod seeds;
pub mod writer;

pub use error::SeedError;
pub use seeds::{LoadReport, SeedLayout, SeedLoader};
pub use writer::{ReportWriter, LATEST_REPORT_FILE};
