//! Raw seed file rows
//!
//! Each row type mirrors one seed file's columns as optional strings and
//! converts into a domain record. Conversion failures reject the row; they
//! never abort the load.

use serde::Deserialize;

use core_kernel::{ClaimId, Currency, MemberId, ProviderId};
use domain_claims::parse::{
    parse_amount, parse_condition_flag, parse_days, parse_denial_flag, parse_seed_date, required,
};
use domain_claims::provider::display_name;
use domain_claims::{
    BeneficiaryRecord, ChronicCondition, ClaimDataError, ClaimRecord, ClaimType, ProviderRecord,
};

/// Required columns of the three claim files
pub const CLAIM_COLUMNS: [&str; 3] = ["desynpuf_id", "clm_id", "clm_pmt_amt"];
/// Required columns of the provider file
pub const PROVIDER_COLUMNS: [&str; 2] = ["npi", "provider_type"];
/// Required columns of the beneficiary file
pub const BENEFICIARY_COLUMNS: [&str; 1] = ["desynpuf_id"];

/// One row of an inpatient, outpatient, or carrier claims file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaimRow {
    pub desynpuf_id: Option<String>,
    pub clm_id: Option<String>,
    pub clm_from_dt: Option<String>,
    pub clm_pmt_amt: Option<String>,
    pub prvdr_num: Option<String>,
    pub prf_physn_npi_1: Option<String>,
    pub clm_prcsg_days: Option<String>,
    pub clm_denied_ind: Option<String>,
}

impl ClaimRow {
    /// Billing provider: `prvdr_num`, falling back to the performing physician
    fn provider(&self) -> Option<&str> {
        [self.prvdr_num.as_deref(), self.prf_physn_npi_1.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|v| !v.is_empty())
    }

    pub fn into_record(self, claim_type: ClaimType, currency: Currency) -> Result<ClaimRecord, ClaimDataError> {
        let id = required("clm_id", self.clm_id.as_deref())?;
        let member = required("desynpuf_id", self.desynpuf_id.as_deref())?;
        let payment = parse_amount("clm_pmt_amt", self.clm_pmt_amt.as_deref(), currency)?;

        let mut claim = ClaimRecord::new(ClaimId::new(id), MemberId::new(member), claim_type, payment)
            .with_denial(parse_denial_flag("clm_denied_ind", self.clm_denied_ind.as_deref())?);
        if let Some(provider) = self.provider() {
            claim = claim.with_provider(ProviderId::new(provider));
        }
        if let Some(date) = parse_seed_date("clm_from_dt", self.clm_from_dt.as_deref())? {
            claim = claim.with_service_date(date);
        }
        if let Some(days) = parse_days("clm_prcsg_days", self.clm_prcsg_days.as_deref())? {
            claim = claim.with_processing_days(days);
        }
        Ok(claim)
    }
}

/// One row of the provider reference file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderRow {
    pub npi: Option<String>,
    pub nppes_provider_last_org_name: Option<String>,
    pub nppes_provider_first_name: Option<String>,
    pub provider_type: Option<String>,
}

impl ProviderRow {
    pub fn into_record(self) -> Result<ProviderRecord, ClaimDataError> {
        let npi = ProviderId::new(required("npi", self.npi.as_deref())?);
        let specialty = required("provider_type", self.provider_type.as_deref())?;
        let name = display_name(
            self.nppes_provider_first_name.as_deref(),
            self.nppes_provider_last_org_name.as_deref(),
            &npi,
        );
        Ok(ProviderRecord::new(npi, name, specialty))
    }
}

/// One row of the beneficiary summary file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BeneficiaryRow {
    pub desynpuf_id: Option<String>,
    pub bene_birth_dt: Option<String>,
    pub sp_alzhdmta: Option<String>,
    pub sp_chf: Option<String>,
    pub sp_chrnkidn: Option<String>,
    pub sp_cncr: Option<String>,
    pub sp_copd: Option<String>,
    pub sp_depressn: Option<String>,
    pub sp_diabetes: Option<String>,
    pub sp_ischmcht: Option<String>,
    pub sp_osteoprs: Option<String>,
    pub sp_ra_oa: Option<String>,
    pub sp_strketia: Option<String>,
}

impl BeneficiaryRow {
    fn flag(&self, condition: ChronicCondition) -> Option<&str> {
        let value = match condition {
            ChronicCondition::Alzheimers => &self.sp_alzhdmta,
            ChronicCondition::HeartFailure => &self.sp_chf,
            ChronicCondition::KidneyDisease => &self.sp_chrnkidn,
            ChronicCondition::Cancer => &self.sp_cncr,
            ChronicCondition::Copd => &self.sp_copd,
            ChronicCondition::Depression => &self.sp_depressn,
            ChronicCondition::Diabetes => &self.sp_diabetes,
            ChronicCondition::IschemicHeartDisease => &self.sp_ischmcht,
            ChronicCondition::Osteoporosis => &self.sp_osteoprs,
            ChronicCondition::Arthritis => &self.sp_ra_oa,
            ChronicCondition::Stroke => &self.sp_strketia,
        };
        value.as_deref()
    }

    pub fn into_record(self) -> Result<BeneficiaryRecord, ClaimDataError> {
        let mut member = BeneficiaryRecord::new(MemberId::new(required(
            "desynpuf_id",
            self.desynpuf_id.as_deref(),
        )?));
        if let Some(born) = parse_seed_date("bene_birth_dt", self.bene_birth_dt.as_deref())? {
            member = member.with_birth_date(born);
        }
        for condition in ChronicCondition::ALL {
            if parse_condition_flag(condition.column(), self.flag(condition))? {
                member = member.with_condition(condition);
            }
        }
        Ok(member)
    }
}
