//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{ClaimId, Currency, MemberId, Money, ProviderId};
use domain_claims::{
    BeneficiaryRecord, ClaimDataError, ClaimRecord, ClaimType, ClaimsDataset,
    ProviderRecord,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builder for constructing test claims
pub struct ClaimBuilder {
    id: ClaimId,
    member_id: MemberId,
    claim_type: ClaimType,
    amount: Decimal,
    currency: Currency,
    provider: Option<ProviderId>,
    service_date: Option<NaiveDate>,
    processing_days: Option<u32>,
    denied: bool,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: ClaimId::new("CLM-0001"),
            member_id: MemberId::new("M001"),
            claim_type: ClaimType::Carrier,
            amount: dec!(100.00),
            currency: Currency::USD,
            provider: None,
            service_date: None,
            processing_days: None,
            denied: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = ClaimId::new(id);
        self
    }

    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member_id = MemberId::new(member);
        self
    }

    pub fn with_type(mut self, claim_type: ClaimType) -> Self {
        self.claim_type = claim_type;
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_provider(mut self, npi: impl Into<String>) -> Self {
        self.provider = Some(ProviderId::new(npi));
        self
    }

    pub fn with_service_date(mut self, date: NaiveDate) -> Self {
        self.service_date = Some(date);
        self
    }

    pub fn with_processing_days(mut self, days: u32) -> Self {
        self.processing_days = Some(days);
        self
    }

    pub fn denied(mut self) -> Self {
        self.denied = true;
        self
    }

    /// Builds the claim
    pub fn build(self) -> ClaimRecord {
        let mut claim = ClaimRecord::new(
            self.id,
            self.member_id,
            self.claim_type,
            Money::new(self.amount, self.currency),
        )
        .with_denial(self.denied);
        if let Some(provider) = self.provider {
            claim = claim.with_provider(provider);
        }
        if let Some(date) = self.service_date {
            claim = claim.with_service_date(date);
        }
        if let Some(days) = self.processing_days {
            claim = claim.with_processing_days(days);
        }
        claim
    }
}

/// Builder for constructing test datasets
pub struct DatasetBuilder {
    currency: Currency,
    claims: Vec<ClaimRecord>,
    providers: Vec<ProviderRecord>,
    beneficiaries: Vec<BeneficiaryRecord>,
    rejected_rows: usize,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetBuilder {
    /// Creates an empty USD dataset builder
    pub fn new() -> Self {
        Self {
            currency: Currency::USD,
            claims: Vec::new(),
            providers: Vec::new(),
            beneficiaries: Vec::new(),
            rejected_rows: 0,
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Adds one claim of `claim_type` per entry in `amounts`
    pub fn with_typed_claims(mut self, claim_type: ClaimType, amounts: &[Decimal]) -> Self {
        let start = self.claims.len();
        for (i, amount) in amounts.iter().enumerate() {
            self.claims.push(
                ClaimBuilder::new()
                    .with_id(format!("CLM-{:04}", start + i + 1))
                    .with_type(claim_type)
                    .with_amount(*amount)
                    .with_currency(self.currency)
                    .build(),
            );
        }
        self
    }

    pub fn with_provider(mut self, npi: &str, name: &str, specialty: &str) -> Self {
        self.providers
            .push(ProviderRecord::new(ProviderId::new(npi), name, specialty));
        self
    }

    pub fn with_member(mut self, member: BeneficiaryRecord) -> Self {
        self.beneficiaries.push(member);
        self
    }

    /// Adds members `M001`..`M{count}` without conditions
    pub fn with_members(mut self, count: usize) -> Self {
        for n in 1..=count {
            self.beneficiaries
                .push(BeneficiaryRecord::new(MemberId::new(format!("M{:03}", n))));
        }
        self
    }

    pub fn with_rejected_rows(mut self, rejected: usize) -> Self {
        self.rejected_rows = rejected;
        self
    }

    /// Builds the dataset, panicking on mixed currencies
    /// Builds the dataset, surfacing the checks `ClaimsDataset::new` runs
    pub fn try_build(self) -> Result<ClaimsDataset, ClaimDataError> {
        let rejected = self.rejected_rows;
        ClaimsDataset::new(self.currency, self.claims, self.providers, self.beneficiaries)
            .map(|dataset| dataset.with_rejected_rows(rejected))
    }

    pub fn build(self) -> ClaimsDataset {
        self.try_build()
            .expect("test dataset claims share the dataset currency and stay in range")
    }
}
