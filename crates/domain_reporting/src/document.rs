//! The report document
//!
//! A `ReportDocument` is produced once per run by the aggregator and then
//! only read: written to disk, rendered to HTML, served by the dashboard.
//! Monetary values, percentages and rates serialize as JSON numbers.
//!
//! Numeric conventions:
//! - money: 2 decimal places
//! - percentages: 0-100, 1 decimal place
//! - rates: fractions 0-1, 4 decimal places

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Currency, ProviderId};
use domain_claims::ClaimType;
use crate::error::ReportError;

/// Decimal places for money values
pub const MONEY_DP: u32 = 2;
/// Decimal places for percentages
pub const PERCENT_DP: u32 = 1;
/// Decimal places for rates
pub const RATE_DP: u32 = 4;
/// Decimal places for averaged counts and days
pub const AVERAGE_DP: u32 = 1;

/// Complete report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub executive_summary: ExecutiveSummary,
    pub financial_analysis: FinancialAnalysis,
    pub provider_analysis: ProviderAnalysis,
    pub member_risk_analysis: MemberRiskAnalysis,
    pub operational_analysis: OperationalAnalysis,
    pub recommendations: Recommendations,
}

impl ReportDocument {
    /// Top-level section keys, in document order
    pub const SECTIONS: [&'static str; 6] = [
        "executive_summary",
        "financial_analysis",
        "provider_analysis",
        "member_risk_analysis",
        "operational_analysis",
        "recommendations",
    ];

    /// Pretty-printed JSON (two-space indent, non-ASCII written verbatim)
    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a document previously produced by [`ReportDocument::to_json_pretty`]
    pub fn from_json(text: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Currency all monetary values are expressed in
    pub fn currency(&self) -> Currency {
        self.executive_summary.report_metadata.currency
    }
}

/// Serializes a document to its JSON text form
pub fn serialize(document: &ReportDocument) -> Result<String, ReportError> {
    document.to_json_pretty()
}

// ============================================================================
// Executive summary
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub report_metadata: ReportMetadata,
    pub key_metrics: KeyMetrics,
    pub claim_type_distribution: Vec<ClaimTypeShare>,
    pub kpi_categories: KpiCategories,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub title: String,
    pub generated_date: NaiveDate,
    pub prepared_by: String,
    pub coverage_period: String,
    /// Share of seed rows accepted, as a percentage
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub data_quality_score: Decimal,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub total_beneficiaries: u64,
    pub total_providers: u64,
    pub total_claims: u64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_claim_value: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub avg_claim_amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub overall_denial_rate: Decimal,
    /// Absent when no claim carries a processing duration
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub avg_processing_days: Option<Decimal>,
}

/// One row of the claim-type distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimTypeShare {
    pub claim_type: ClaimType,
    pub count: u64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub percentage: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub avg_value: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub denial_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCategories {
    pub financial: FinancialKpis,
    pub utilization: UtilizationKpis,
    pub quality: QualityKpis,
    pub risk: RiskKpis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialKpis {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub avg_claim_amount: Decimal,
    /// Payments on claims that were not denied
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_reimbursement: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub reimbursement_rate: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub cost_per_member: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationKpis {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub claims_per_member: Decimal,
    /// Distinct provider numbers billing claims
    pub provider_diversity: u64,
    pub members_with_claims: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityKpis {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub denial_rate: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub processing_time: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub data_quality_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskKpis {
    pub high_risk_members: u64,
    pub high_cost_claims: u64,
    /// Members with at least the configured number of claims
    pub frequent_users: u64,
}

// ============================================================================
// Financial analysis
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAnalysis {
    pub monthly_trends: Vec<MonthlyTrend>,
    pub high_cost_analysis: HighCostAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// `YYYY-MM`
    pub month: String,
    pub claims: u64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub reimbursed: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub reimbursement_rate: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub denial_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighCostAnalysis {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub threshold_amount: Decimal,
    pub high_cost_count: u64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub pct_of_total_claims: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub pct_of_total_value: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub avg_processing_days: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub avg_amount: Decimal,
}

// ============================================================================
// Provider analysis
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAnalysis {
    pub top_providers: Vec<ProviderPerformance>,
    pub specialty_comparison: Vec<SpecialtySummary>,
}

/// Provider performance tier, derived from denial rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PerformanceTier {
    #[serde(rename = "Top Performer")]
    TopPerformer,
    #[serde(rename = "High Performer")]
    HighPerformer,
    #[serde(rename = "Average Performer")]
    AveragePerformer,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    /// No claims to judge by
    #[serde(rename = "Unrated")]
    Unrated,
}

impl PerformanceTier {
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceTier::TopPerformer => "Top Performer",
            PerformanceTier::HighPerformer => "High Performer",
            PerformanceTier::AveragePerformer => "Average Performer",
            PerformanceTier::NeedsImprovement => "Needs Improvement",
            PerformanceTier::Unrated => "Unrated",
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderPerformance {
    pub rank: u32,
    pub npi: ProviderId,
    pub name: String,
    pub specialty: String,
    pub claims: u64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub avg_amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub denial_rate: Decimal,
    pub performance_tier: PerformanceTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialtySummary {
    pub specialty: String,
    pub provider_count: u64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub avg_claims: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub avg_amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub denial_rate: Decimal,
    pub top_performers: u64,
}

// ============================================================================
// Member risk analysis
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRiskAnalysis {
    pub risk_stratification: Vec<RiskTierSummary>,
    pub chronic_conditions_impact: Vec<ChronicConditionImpact>,
}

/// Member risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "Low Risk")]
    Low,
}

impl RiskTier {
    /// Tiers in reporting order
    pub const ALL: [RiskTier; 3] = [RiskTier::High, RiskTier::Medium, RiskTier::Low];

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::High => "High Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::Low => "Low Risk",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskTierSummary {
    pub tier: RiskTier,
    pub count: u64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub percentage: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub avg_cost: Decimal,
    /// Share of total member cost carried by the tier, as a percentage
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub cost_share: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub avg_chronic_conditions: Decimal,
    pub needs_case_management: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChronicConditionImpact {
    pub condition_category: String,
    pub count: u64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub avg_cost: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub avg_claims: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub denial_rate: Decimal,
}

// ============================================================================
// Operational analysis
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalAnalysis {
    pub processing_efficiency: Vec<ProcessingBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingBucket {
    pub category: String,
    pub count: u64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub percentage: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub avg_days: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub denial_rate: Decimal,
}

// ============================================================================
// Recommendations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recommendations {
    pub cost_optimization: Vec<CostOpportunity>,
    pub quality_improvements: Vec<QualityImprovement>,
}

/// What a recommendation's affected count is counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffectedPopulation {
    Providers,
    Members,
    Claims,
}

impl AffectedPopulation {
    pub fn label(&self) -> &'static str {
        match self {
            AffectedPopulation::Providers => "Providers",
            AffectedPopulation::Members => "Members",
            AffectedPopulation::Claims => "Claims",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostOpportunity {
    pub opportunity: String,
    pub affected: AffectedPopulation,
    pub affected_count: u64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub potential_savings: Decimal,
    pub action: String,
}

/// What a quality improvement is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    ProcessingDays,
    DenialRate,
}

/// Measured value a quality improvement is tracked by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementMetric {
    pub kind: MetricKind,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub current: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub target: Decimal,
}

impl ImprovementMetric {
    pub fn processing_days(current: Decimal, target: Decimal) -> Self {
        Self { kind: MetricKind::ProcessingDays, current, target }
    }

    pub fn denial_rate(current: Decimal, target: Decimal) -> Self {
        Self { kind: MetricKind::DenialRate, current, target }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityImprovement {
    pub area: String,
    pub affected: AffectedPopulation,
    pub affected_count: u64,
    pub metric: ImprovementMetric,
    pub recommendation: String,
}
