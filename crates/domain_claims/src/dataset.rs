//! The full set of records a report is computed from

use std::collections::{BTreeMap, BTreeSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{Currency, MemberId, ProviderId};
use crate::beneficiary::BeneficiaryRecord;
use crate::claim::{ClaimRecord, ClaimType};
use crate::error::ClaimDataError;
use crate::provider::ProviderRecord;

/// Claims, providers, and members loaded for one reporting run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimsDataset {
    currency: Currency,
    claims: Vec<ClaimRecord>,
    providers: Vec<ProviderRecord>,
    beneficiaries: Vec<BeneficiaryRecord>,
    rejected_rows: usize,
}

impl ClaimsDataset {
    /// Creates a dataset, checking every claim is paid in `currency` and
    /// within [`core_kernel::Money::MAX_AMOUNT`]
    pub fn new(
        currency: Currency,
        claims: Vec<ClaimRecord>,
        providers: Vec<ProviderRecord>,
        beneficiaries: Vec<BeneficiaryRecord>,
    ) -> Result<Self, ClaimDataError> {
        if let Some(claim) = claims.iter().find(|c| c.payment.currency() != currency) {
            return Err(ClaimDataError::CurrencyMismatch {
                claim: claim.id.to_string(),
                found: claim.payment.currency().to_string(),
                expected: currency.to_string(),
            });
        }
        if let Some(claim) = claims.iter().find(|c| c.payment.ensure_in_range().is_err()) {
            return Err(ClaimDataError::AmountOutOfRange {
                claim: claim.id.to_string(),
                amount: claim.payment.amount(),
            });
        }

        debug!(
            claims = claims.len(),
            providers = providers.len(),
            beneficiaries = beneficiaries.len(),
            "Assembled claims dataset"
        );

        Ok(Self {
            currency,
            claims,
            providers,
            beneficiaries,
            rejected_rows: 0,
        })
    }

    /// An empty dataset in `currency`
    pub fn empty(currency: Currency) -> Self {
        Self {
            currency,
            claims: Vec::new(),
            providers: Vec::new(),
            beneficiaries: Vec::new(),
            rejected_rows: 0,
        }
    }

    /// Records how many seed rows were rejected while loading
    pub fn with_rejected_rows(mut self, rejected: usize) -> Self {
        self.rejected_rows = rejected;
        self
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn claims(&self) -> &[ClaimRecord] {
        &self.claims
    }

    pub fn providers(&self) -> &[ProviderRecord] {
        &self.providers
    }

    pub fn beneficiaries(&self) -> &[BeneficiaryRecord] {
        &self.beneficiaries
    }

    pub fn rejected_rows(&self) -> usize {
        self.rejected_rows
    }

    /// Rows that made it into the dataset
    pub fn accepted_rows(&self) -> usize {
        self.claims.len() + self.providers.len() + self.beneficiaries.len()
    }

    /// Claims of one type
    pub fn claims_of_type(&self, claim_type: ClaimType) -> impl Iterator<Item = &ClaimRecord> {
        self.claims.iter().filter(move |c| c.claim_type == claim_type)
    }

    /// Claims grouped by member, ordered by member id
    pub fn claims_by_member(&self) -> BTreeMap<&MemberId, Vec<&ClaimRecord>> {
        let mut grouped: BTreeMap<&MemberId, Vec<&ClaimRecord>> = BTreeMap::new();
        for claim in &self.claims {
            grouped.entry(&claim.member_id).or_default().push(claim);
        }
        grouped
    }

    /// Claims grouped by billing provider; claims without one are skipped
    pub fn claims_by_provider(&self) -> BTreeMap<&ProviderId, Vec<&ClaimRecord>> {
        let mut grouped: BTreeMap<&ProviderId, Vec<&ClaimRecord>> = BTreeMap::new();
        for claim in &self.claims {
            if let Some(provider) = &claim.provider {
                grouped.entry(provider).or_default().push(claim);
            }
        }
        grouped
    }

    /// Distinct provider numbers appearing on claims
    pub fn distinct_billing_providers(&self) -> usize {
        self.claims
            .iter()
            .filter_map(|c| c.provider.as_ref())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ClaimId, Money};
    use rust_decimal_macros::dec;

    fn claim(id: &str, member: &str, currency: Currency) -> ClaimRecord {
        ClaimRecord::new(
            ClaimId::new(id),
            MemberId::new(member),
            ClaimType::Carrier,
            Money::new(dec!(50), currency),
        )
    }

    #[test]
    fn test_rejects_foreign_currency_claims() {
        let result = ClaimsDataset::new(
            Currency::USD,
            vec![claim("C1", "M1", Currency::USD), claim("C2", "M1", Currency::EUR)],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(ClaimDataError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_rejects_amounts_that_would_overflow_totals() {
        let mut huge = claim("C1", "M1", Currency::USD);
        huge.payment = Money::new(dec!(50000000000000000000000000000), Currency::USD);
        let result = ClaimsDataset::new(
            Currency::USD,
            vec![huge.clone(), huge],
            vec![],
            vec![],
        );
        assert!(matches!(
            result,
            Err(ClaimDataError::AmountOutOfRange { ref claim, .. }) if claim == "C1"
        ));
    }

    #[test]
    fn test_claims_by_member_groups() {
        let dataset = ClaimsDataset::new(
            Currency::USD,
            vec![
                claim("C1", "M2", Currency::USD),
                claim("C2", "M1", Currency::USD),
                claim("C3", "M2", Currency::USD),
            ],
            vec![],
            vec![],
        )
        .unwrap();

        let grouped = dataset.claims_by_member();
        let keys: Vec<&str> = grouped.keys().map(|m| m.as_str()).collect();
        assert_eq!(keys, vec!["M1", "M2"]);
        assert_eq!(grouped[&MemberId::new("M2")].len(), 2);
    }
}
