//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims analytics test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built records, seed files, and a sample report
//! - `builders`: Builder patterns for claims and datasets
//! - `assertions`: Custom assertion helpers for report figures
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
