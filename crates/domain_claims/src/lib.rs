//! Claims Domain
//!
//! Immutable records for healthcare claims, billing providers, and covered
//! members, as exported from the claims data warehouse seed files.
//!
//! # Record Relationships
//!
//! ```text
//! BeneficiaryRecord (desynpuf_id) 1 --- * ClaimRecord * --- 0..1 ProviderRecord (npi)
//! ```

pub mod claim;
pub mod provider;
pub mod beneficiary;
pub mod dataset;
pub mod parse;
pub mod error;

pub use claim::{ClaimRecord, ClaimType};
pub use provider::ProviderRecord;
pub use beneficiary::{BeneficiaryRecord, ChronicCondition};
pub use dataset::ClaimsDataset;
pub use error::ClaimDataError;
