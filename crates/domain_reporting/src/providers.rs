//! Provider performance ranking and specialty comparison

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

use core_kernel::{average, ProviderId, Rate};
use domain_claims::provider::display_name;
use domain_claims::ClaimsDataset;
use crate::config::ProviderConfig;
use crate::document::{
    PerformanceTier, ProviderAnalysis, ProviderPerformance, SpecialtySummary, AVERAGE_DP, MONEY_DP,
    RATE_DP,
};

/// Specialty given to billing providers missing from the reference file
pub const UNKNOWN_SPECIALTY: &str = "Unknown";

/// Claim totals for one provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderStats {
    pub npi: ProviderId,
    pub name: String,
    pub specialty: String,
    pub claims: usize,
    pub denied_claims: usize,
    pub total_value: Decimal,
}

impl ProviderStats {
    pub fn denial_rate(&self) -> Rate {
        Rate::from_counts(self.denied_claims, self.claims)
    }

    pub fn avg_amount(&self) -> Decimal {
        average(self.total_value, self.claims, MONEY_DP)
    }

    pub fn tier(&self, config: &ProviderConfig) -> PerformanceTier {
        if self.claims == 0 {
            return PerformanceTier::Unrated;
        }
        classify_denial_rate(self.denial_rate().as_decimal(), config)
    }
}

/// Performance tier for a provider with claims
pub fn classify_denial_rate(rate: Decimal, config: &ProviderConfig) -> PerformanceTier {
    if rate < config.top_performer_max_denial {
        PerformanceTier::TopPerformer
    } else if rate < config.high_performer_max_denial {
        PerformanceTier::HighPerformer
    } else if rate < config.average_performer_max_denial {
        PerformanceTier::AveragePerformer
    } else {
        PerformanceTier::NeedsImprovement
    }
}

/// Joins providers with the claims they billed.
///
/// Every provider in the reference file gets an entry, with or without
/// claims. Provider numbers that appear only on claims are added under
/// [`UNKNOWN_SPECIALTY`]. Entries are ordered by NPI.
pub fn provider_stats(dataset: &ClaimsDataset) -> Vec<ProviderStats> {
    let by_provider = dataset.claims_by_provider();
    let mut stats: BTreeMap<ProviderId, ProviderStats> = dataset
        .providers()
        .iter()
        .map(|p| {
            (
                p.npi.clone(),
                ProviderStats {
                    npi: p.npi.clone(),
                    name: p.name.clone(),
                    specialty: p.specialty.clone(),
                    claims: 0,
                    denied_claims: 0,
                    total_value: Decimal::ZERO,
                },
            )
        })
        .collect();

    for (npi, claims) in by_provider {
        let entry = stats.entry(npi.clone()).or_insert_with(|| ProviderStats {
            npi: npi.clone(),
            name: display_name(None, None, npi),
            specialty: UNKNOWN_SPECIALTY.to_string(),
            claims: 0,
            denied_claims: 0,
            total_value: Decimal::ZERO,
        });
        entry.claims += claims.len();
        entry.denied_claims += claims.iter().filter(|c| c.denied).count();
        entry.total_value += claims.iter().map(|c| c.amount()).sum::<Decimal>();
    }

    stats.into_values().collect()
}

/// Ranks providers by claim count, then total value, then NPI
pub fn rank_providers(stats: &[ProviderStats]) -> Vec<&ProviderStats> {
    let mut ranked: Vec<&ProviderStats> = stats.iter().collect();
    ranked.sort_by(|a, b| {
        b.claims
            .cmp(&a.claims)
            .then(b.total_value.cmp(&a.total_value))
            .then(a.npi.cmp(&b.npi))
    });
    ranked
}

fn top_providers(stats: &[ProviderStats], config: &ProviderConfig) -> Vec<ProviderPerformance> {
    rank_providers(stats)
        .into_iter()
        .take(config.top_n)
        .enumerate()
        .map(|(i, p)| ProviderPerformance {
            rank: (i + 1) as u32,
            npi: p.npi.clone(),
            name: p.name.clone(),
            specialty: p.specialty.clone(),
            claims: p.claims as u64,
            avg_amount: p.avg_amount(),
            denial_rate: p.denial_rate().rounded(RATE_DP).as_decimal(),
            performance_tier: p.tier(config),
        })
        .collect()
}

#[derive(Default)]
struct SpecialtyTally {
    providers: usize,
    claims: usize,
    denied: usize,
    value: Decimal,
    top_performers: usize,
}

fn specialty_comparison(stats: &[ProviderStats], config: &ProviderConfig) -> Vec<SpecialtySummary> {
    let mut grouped: BTreeMap<&str, SpecialtyTally> = BTreeMap::new();
    for p in stats {
        let tally = grouped.entry(p.specialty.as_str()).or_default();
        tally.providers += 1;
        tally.claims += p.claims;
        tally.denied += p.denied_claims;
        tally.value += p.total_value;
        if p.tier(config) == PerformanceTier::TopPerformer {
            tally.top_performers += 1;
        }
    }

    let mut summaries: Vec<SpecialtySummary> = grouped
        .into_iter()
        .map(|(specialty, t)| SpecialtySummary {
            specialty: specialty.to_string(),
            provider_count: t.providers as u64,
            avg_claims: average(Decimal::from(t.claims), t.providers, AVERAGE_DP),
            avg_amount: average(t.value, t.claims, MONEY_DP),
            denial_rate: Rate::from_counts(t.denied, t.claims).rounded(RATE_DP).as_decimal(),
            top_performers: t.top_performers as u64,
        })
        .collect();

    // Largest specialties first; BTreeMap order breaks ties by name
    summaries.sort_by(|a, b| b.provider_count.cmp(&a.provider_count));
    summaries
}

/// Top providers and the specialty comparison table
pub fn compute_provider_analysis(stats: &[ProviderStats], config: &ProviderConfig) -> ProviderAnalysis {
    let analysis = ProviderAnalysis {
        top_providers: top_providers(stats, config),
        specialty_comparison: specialty_comparison(stats, config),
    };
    debug!(
        providers = stats.len(),
        specialties = analysis.specialty_comparison.len(),
        "Provider analysis computed"
    );
    analysis
}
