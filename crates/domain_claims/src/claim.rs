//! Claim records

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClaimId, MemberId, Money, ProviderId};

/// Setting in which the claim was billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClaimType {
    /// Hospital stay
    Inpatient,
    /// Hospital outpatient visit
    Outpatient,
    /// Physician / supplier (Part B carrier) claim
    Carrier,
}

impl ClaimType {
    /// All claim types in reporting order
    pub const ALL: [ClaimType; 3] = [ClaimType::Inpatient, ClaimType::Outpatient, ClaimType::Carrier];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            ClaimType::Inpatient => "Inpatient",
            ClaimType::Outpatient => "Outpatient",
            ClaimType::Carrier => "Carrier",
        }
    }

    /// Name of the seed file holding claims of this type
    pub fn seed_file(&self) -> &'static str {
        match self {
            ClaimType::Inpatient => "sample_inpatient_claims.csv",
            ClaimType::Outpatient => "sample_outpatient_claims.csv",
            ClaimType::Carrier => "sample_carrier_claims.csv",
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single healthcare claim as loaded from seed data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Claim number
    pub id: ClaimId,
    /// Beneficiary the claim was filed for
    pub member_id: MemberId,
    /// Claim type
    pub claim_type: ClaimType,
    /// Billing provider number, when known
    pub provider: Option<ProviderId>,
    /// First date of service
    pub service_date: Option<NaiveDate>,
    /// Payment amount
    pub payment: Money,
    /// Days from receipt to adjudication
    pub processing_days: Option<u32>,
    /// Whether payment was denied
    pub denied: bool,
}

impl ClaimRecord {
    /// Creates a paid claim with no provider, date, or processing time
    pub fn new(id: ClaimId, member_id: MemberId, claim_type: ClaimType, payment: Money) -> Self {
        Self {
            id,
            member_id,
            claim_type,
            provider: None,
            service_date: None,
            payment,
            processing_days: None,
            denied: false,
        }
    }

    pub fn with_provider(mut self, provider: ProviderId) -> Self {
        self.provider = Some(provider);
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

    pub fn with_denial(mut self, denied: bool) -> Self {
        self.denied = denied;
        self
    }

    /// Payment amount as a plain decimal
    pub fn amount(&self) -> Decimal {
        self.payment.amount()
    }

    /// Amount actually reimbursed: nothing for a denied claim
    pub fn reimbursed_amount(&self) -> Decimal {
        if self.denied {
            dec!(0)
        } else {
            self.payment.amount()
        }
    }

    /// Service month as `YYYY-MM`
    pub fn service_month(&self) -> Option<String> {
        self.service_date
            .map(|d| format!("{:04}-{:02}", d.year(), d.month()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;

    fn claim() -> ClaimRecord {
        ClaimRecord::new(
            ClaimId::new("C1"),
            MemberId::new("M1"),
            ClaimType::Inpatient,
            Money::new(dec!(4000), Currency::USD),
        )
    }

    #[test]
    fn test_denied_claim_reimburses_nothing() {
        let c = claim().with_denial(true);
        assert_eq!(c.reimbursed_amount(), dec!(0));
        assert_eq!(c.amount(), dec!(4000));
    }

    #[test]
    fn test_service_month() {
        let c = claim().with_service_date(NaiveDate::from_ymd_opt(2009, 3, 14).unwrap());
        assert_eq!(c.service_month().as_deref(), Some("2009-03"));
        assert_eq!(claim().service_month(), None);
    }
}
