//! Core Kernel - Foundational types for claims analytics
//!
//! This crate provides the building blocks shared by every other crate:
//! - Money types with precise decimal arithmetic
//! - Rates and largest-remainder percentage shares
//! - Identifiers for claims, members, and providers

pub mod money;
pub mod share;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, MoneyError, Rate};
pub use share::{average, largest_remainder_percentages, nearest_rank, percentage_of};
pub use identifiers::{ClaimId, MemberId, ProviderId};
pub use error::CoreError;
