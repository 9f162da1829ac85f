//! Reporting Domain
//!
//! Business-intelligence aggregations over a claims dataset and the
//! `ReportDocument` they produce.
//!
//! # Sections
//!
//! - Executive summary: metadata, key metrics, claim-type distribution, KPIs
//! - Financial analysis: monthly trends, high-cost claims
//! - Provider analysis: top providers, specialty comparison
//! - Member risk analysis: risk tiers, chronic condition impact
//! - Operational analysis: processing efficiency
//! - Recommendations: cost optimization, quality improvement

pub mod aggregator;
pub mod config;
pub mod distribution;
pub mod document;
pub mod error;
pub mod financial;
pub mod invariants;
pub mod kpi;
pub mod members;
pub mod operational;
pub mod providers;
pub mod recommendations;
pub mod risk;

pub use aggregator::ReportAggregator;
pub use config::{ProviderConfig, RecommendationConfig, ReportConfig, RiskConfig};
pub use distribution::compute_claim_type_distribution;
pub use document::{serialize, PerformanceTier, ReportDocument, RiskTier};
pub use error::ReportError;
pub use members::{build_member_profiles, MemberProfile};
pub use risk::compute_risk_stratification;
