//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the claims analytics suite. The seed
//! files and the in-memory sample dataset describe the same ten claims, so
//! tests of the loader and of the aggregations can share expectations.

use chrono::NaiveDate;
use core_kernel::{ClaimId, Currency, MemberId, Money, ProviderId};
use domain_claims::{
    BeneficiaryRecord, ChronicCondition, ClaimRecord, ClaimType, ClaimsDataset, ProviderRecord,
};
use domain_reporting::{ReportAggregator, ReportConfig, ReportDocument};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs;
use std::io;
use std::path::Path;

/// Fixture for dates
pub struct DateFixtures;

impl DateFixtures {
    /// Date reports in the suite are generated on
    pub fn report_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    /// A service date in the sample coverage period
    pub fn service_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2009, 1, 4).unwrap()
    }
}

/// Expected figures for the sample seed data
pub struct SampleFigures;

impl SampleFigures {
    pub const CLAIMS: u64 = 10;
    pub const INPATIENT_CLAIMS: u64 = 3;
    pub const PROVIDERS: u64 = 5;
    pub const BENEFICIARIES: u64 = 5;
    pub const DENIED_CLAIMS: u64 = 2;

    pub fn total_value() -> Decimal {
        dec!(24840.50)
    }

    pub fn inpatient_value() -> Decimal {
        dec!(24000.00)
    }
}

/// CSV text for the five seed files
pub struct SeedFixtures;

impl SeedFixtures {
    pub const INPATIENT: &'static str = "\
desynpuf_id,clm_id,clm_from_dt,clm_pmt_amt,prvdr_num,clm_prcsg_days,clm_denied_ind
M001,IP1001,20090104,4000.0,1003000126,12,N
M002,IP1002,20090215,12000.0,1003000134,35,N
M003,IP1003,20090320,8000.0,1003000126,20,Y
";

    pub const OUTPATIENT: &'static str = "\
desynpuf_id,clm_id,clm_from_dt,clm_pmt_amt,prvdr_num,clm_prcsg_days,clm_denied_ind
M001,OP2001,20090110,150.0,1003000142,5,N
M004,OP2002,20090212,300.0,1003000142,9,N
M002,OP2003,20090318,75.5,1003000134,3,N
";

    /// Carrier claims name the performing physician instead of `prvdr_num`
    pub const CARRIER: &'static str = "\
desynpuf_id,clm_id,clm_from_dt,clm_pmt_amt,prf_physn_npi_1,clm_prcsg_days,clm_denied_ind
M001,CR3001,20090105,60.0,1003000159,2,N
M003,CR3002,20090222,120.0,1003000159,4,N
M004,CR3003,20090325,45.0,1003000126,6,N
M005,CR3004,20090326,90.0,1003000167,7,Y
";

    pub const PROVIDERS: &'static str = "\
npi,nppes_provider_last_org_name,nppes_provider_first_name,provider_type
1003000126,SMITH,JOHN,Internal Medicine
1003000134,MERCY GENERAL HOSPITAL,,Hospital
1003000142,LEE,ANNA,Family Practice
1003000159,PATEL,RAJ,Internal Medicine
1003000167,ORTHO GROUP,,Orthopedic Surgery
";

    pub const BENEFICIARIES: &'static str = "\
desynpuf_id,bene_birth_dt,sp_alzhdmta,sp_chf,sp_chrnkidn,sp_cncr,sp_copd,sp_depressn,sp_diabetes,sp_ischmcht,sp_osteoprs,sp_ra_oa,sp_strketia
M001,19230501,2,1,2,2,2,2,1,1,2,2,2
M002,19431201,1,1,1,2,1,2,1,1,2,2,2
M003,19360915,2,2,2,2,2,2,2,2,2,2,2
M004,19500102,2,2,2,2,2,1,2,2,2,2,2
M005,19281010,2,2,2,1,2,2,1,2,2,2,2
";

    /// Every seed file with its name
    pub fn files() -> [(&'static str, &'static str); 5] {
        [
            (ClaimType::Inpatient.seed_file(), Self::INPATIENT),
            (ClaimType::Outpatient.seed_file(), Self::OUTPATIENT),
            (ClaimType::Carrier.seed_file(), Self::CARRIER),
            ("sample_provider_data.csv", Self::PROVIDERS),
            ("sample_beneficiary_summary.csv", Self::BENEFICIARIES),
        ]
    }

    /// Writes the sample seed files into `dir`
    pub fn write_to(dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)?;
        for (name, contents) in Self::files() {
            fs::write(dir.join(name), contents)?;
        }
        Ok(())
    }
}

/// In-memory equivalents of the seed files
pub struct DatasetFixtures;

impl DatasetFixtures {
    fn claim(
        id: &str,
        member: &str,
        claim_type: ClaimType,
        date: (i32, u32, u32),
        amount: Decimal,
        provider: &str,
        days: u32,
        denied: bool,
    ) -> ClaimRecord {
        ClaimRecord::new(
            ClaimId::new(id),
            MemberId::new(member),
            claim_type,
            Money::new(amount, Currency::USD),
        )
        .with_service_date(NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap())
        .with_provider(ProviderId::new(provider))
        .with_processing_days(days)
        .with_denial(denied)
    }

    pub fn sample_claims() -> Vec<ClaimRecord> {
        use ClaimType::*;
        vec![
            Self::claim("IP1001", "M001", Inpatient, (2009, 1, 4), dec!(4000), "1003000126", 12, false),
            Self::claim("IP1002", "M002", Inpatient, (2009, 2, 15), dec!(12000), "1003000134", 35, false),
            Self::claim("IP1003", "M003", Inpatient, (2009, 3, 20), dec!(8000), "1003000126", 20, true),
            Self::claim("OP2001", "M001", Outpatient, (2009, 1, 10), dec!(150), "1003000142", 5, false),
            Self::claim("OP2002", "M004", Outpatient, (2009, 2, 12), dec!(300), "1003000142", 9, false),
            Self::claim("OP2003", "M002", Outpatient, (2009, 3, 18), dec!(75.5), "1003000134", 3, false),
            Self::claim("CR3001", "M001", Carrier, (2009, 1, 5), dec!(60), "1003000159", 2, false),
            Self::claim("CR3002", "M003", Carrier, (2009, 2, 22), dec!(120), "1003000159", 4, false),
            Self::claim("CR3003", "M004", Carrier, (2009, 3, 25), dec!(45), "1003000126", 6, false),
            Self::claim("CR3004", "M005", Carrier, (2009, 3, 26), dec!(90), "1003000167", 7, true),
        ]
    }

    pub fn sample_providers() -> Vec<ProviderRecord> {
        vec![
            ProviderRecord::new(ProviderId::new("1003000126"), "JOHN SMITH", "Internal Medicine"),
            ProviderRecord::new(ProviderId::new("1003000134"), "MERCY GENERAL HOSPITAL", "Hospital"),
            ProviderRecord::new(ProviderId::new("1003000142"), "ANNA LEE", "Family Practice"),
            ProviderRecord::new(ProviderId::new("1003000159"), "RAJ PATEL", "Internal Medicine"),
            ProviderRecord::new(ProviderId::new("1003000167"), "ORTHO GROUP", "Orthopedic Surgery"),
        ]
    }

    pub fn sample_beneficiaries() -> Vec<BeneficiaryRecord> {
        use ChronicCondition::*;
        let member = |id: &str, born: (i32, u32, u32), conditions: &[ChronicCondition]| {
            conditions.iter().fold(
                BeneficiaryRecord::new(MemberId::new(id))
                    .with_birth_date(NaiveDate::from_ymd_opt(born.0, born.1, born.2).unwrap()),
                |m, c| m.with_condition(*c),
            )
        };
        vec![
            member("M001", (1923, 5, 1), &[HeartFailure, Diabetes, IschemicHeartDisease]),
            member(
                "M002",
                (1943, 12, 1),
                &[Alzheimers, HeartFailure, KidneyDisease, Copd, Diabetes, IschemicHeartDisease],
            ),
            member("M003", (1936, 9, 15), &[]),
            member("M004", (1950, 1, 2), &[Depression]),
            member("M005", (1928, 10, 10), &[Cancer, Diabetes]),
        ]
    }

    /// The sample seed data as a dataset
    pub fn sample() -> ClaimsDataset {
        ClaimsDataset::new(
            Currency::USD,
            Self::sample_claims(),
            Self::sample_providers(),
            Self::sample_beneficiaries(),
        )
        .expect("sample dataset is single-currency")
    }
}

/// Fixture for generated reports
pub struct ReportFixtures;

impl ReportFixtures {
    /// Report over the sample dataset with the default configuration
    pub fn sample_report() -> ReportDocument {
        ReportAggregator::new(ReportConfig::default())
            .and_then(|aggregator| aggregator.generate(&DatasetFixtures::sample(), DateFixtures::report_date()))
            .expect("sample report generates")
    }

    /// Report over an empty dataset
    pub fn empty_report() -> ReportDocument {
        ReportAggregator::new(ReportConfig::default())
            .and_then(|aggregator| {
                aggregator.generate(&ClaimsDataset::empty(Currency::USD), DateFixtures::report_date())
            })
            .expect("empty report generates")
    }

    /// Sample report serialized as pretty JSON
    pub fn sample_report_json() -> String {
        Self::sample_report()
            .to_json_pretty()
            .expect("sample report serializes")
    }
}
