//! Covered members (beneficiaries)

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::MemberId;

/// Chronic condition flags carried on the beneficiary summary file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChronicCondition {
    Alzheimers,
    HeartFailure,
    KidneyDisease,
    Cancer,
    Copd,
    Depression,
    Diabetes,
    IschemicHeartDisease,
    Osteoporosis,
    Arthritis,
    Stroke,
}

impl ChronicCondition {
    pub const ALL: [ChronicCondition; 11] = [
        ChronicCondition::Alzheimers,
        ChronicCondition::HeartFailure,
        ChronicCondition::KidneyDisease,
        ChronicCondition::Cancer,
        ChronicCondition::Copd,
        ChronicCondition::Depression,
        ChronicCondition::Diabetes,
        ChronicCondition::IschemicHeartDisease,
        ChronicCondition::Osteoporosis,
        ChronicCondition::Arthritis,
        ChronicCondition::Stroke,
    ];

    /// Seed file column holding the flag
    pub fn column(&self) -> &'static str {
        match self {
            ChronicCondition::Alzheimers => "sp_alzhdmta",
            ChronicCondition::HeartFailure => "sp_chf",
            ChronicCondition::KidneyDisease => "sp_chrnkidn",
            ChronicCondition::Cancer => "sp_cncr",
            ChronicCondition::Copd => "sp_copd",
            ChronicCondition::Depression => "sp_depressn",
            ChronicCondition::Diabetes => "sp_diabetes",
            ChronicCondition::IschemicHeartDisease => "sp_ischmcht",
            ChronicCondition::Osteoporosis => "sp_osteoprs",
            ChronicCondition::Arthritis => "sp_ra_oa",
            ChronicCondition::Stroke => "sp_strketia",
        }
    }
}

/// A covered member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeneficiaryRecord {
    /// Member identifier claims are linked by
    pub id: MemberId,
    /// Date of birth
    pub birth_date: Option<NaiveDate>,
    /// Chronic conditions on file
    pub chronic_conditions: BTreeSet<ChronicCondition>,
}

impl BeneficiaryRecord {
    pub fn new(id: MemberId) -> Self {
        Self {
            id,
            birth_date: None,
            chronic_conditions: BTreeSet::new(),
        }
    }

    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    pub fn with_condition(mut self, condition: ChronicCondition) -> Self {
        self.chronic_conditions.insert(condition);
        self
    }

    /// Number of chronic conditions on file
    pub fn condition_count(&self) -> usize {
        self.chronic_conditions.len()
    }

    /// Age in whole years on `as_of`
    pub fn age_on(&self, as_of: NaiveDate) -> Option<u32> {
        let birth = self.birth_date?;
        let mut age = as_of.year() - birth.year();
        if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        u32::try_from(age).ok()
    }
}
