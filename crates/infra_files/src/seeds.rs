//! Seed CSV loading
//!
//! Headers are matched case-insensitively. Every required column must be
//! present or the file is refused; individual rows that fail to convert are
//! skipped with a warning and counted in the file's `LoadReport`.

use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use core_kernel::Currency;
use domain_claims::{
    BeneficiaryRecord, ClaimDataError, ClaimRecord, ClaimType, ClaimsDataset, ProviderRecord,
};

use crate::error::SeedError;
use crate::rows::{
    BeneficiaryRow, ClaimRow, ProviderRow, BENEFICIARY_COLUMNS, CLAIM_COLUMNS, PROVIDER_COLUMNS,
};

/// Provider reference file name
pub const PROVIDER_FILE: &str = "sample_provider_data.csv";
/// Beneficiary summary file name
pub const BENEFICIARY_FILE: &str = "sample_beneficiary_summary.csv";

/// Where the seed files live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedLayout {
    pub dir: PathBuf,
}

impl SeedLayout {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn claims_path(&self, claim_type: ClaimType) -> PathBuf {
        self.dir.join(claim_type.seed_file())
    }

    pub fn providers_path(&self) -> PathBuf {
        self.dir.join(PROVIDER_FILE)
    }

    pub fn beneficiaries_path(&self) -> PathBuf {
        self.dir.join(BENEFICIARY_FILE)
    }
}

impl Default for SeedLayout {
    fn default() -> Self {
        Self::new("seeds")
    }
}

/// Row counts for one seed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub file: String,
    pub rows_read: usize,
    pub rows_rejected: usize,
}

impl LoadReport {
    fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            rows_read: 0,
            rows_rejected: 0,
        }
    }

    pub fn rows_accepted(&self) -> usize {
        self.rows_read - self.rows_rejected
    }

    fn reject(&mut self, line: usize, reason: &str) {
        self.rows_rejected += 1;
        warn!(file = %self.file, line, reason, "Rejected seed row");
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads every row of `path`, converting each with `convert`.
///
/// Line numbers in warnings are 1-based and count the header line.
fn read_rows<T, R, F>(
    path: &Path,
    required_columns: &[&'static str],
    convert: F,
) -> Result<(Vec<R>, LoadReport), SeedError>
where
    T: DeserializeOwned,
    F: Fn(T) -> Result<R, ClaimDataError>,
{
    if !path.is_file() {
        return Err(SeedError::file_not_found(path));
    }
    let file = file_label(path);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SeedError::csv(&file, e))?;

    let headers: csv::StringRecord = reader
        .headers()
        .map_err(|e| SeedError::csv(&file, e))?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();
    for column in required_columns.iter().copied() {
        if !headers.iter().any(|h| h == column) {
            return Err(SeedError::MissingColumn {
                file: file.clone(),
                column,
            });
        }
    }
    reader.set_headers(headers);

    let mut report = LoadReport::new(file);
    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<T>().enumerate() {
        let line = index + 2;
        report.rows_read += 1;
        match result {
            Ok(row) => match convert(row) {
                Ok(record) => records.push(record),
                Err(e) => report.reject(line, &e.to_string()),
            },
            Err(e) if e.is_io_error() => return Err(SeedError::csv(&report.file, e)),
            Err(e) => report.reject(line, &e.to_string()),
        }
    }

    debug!(
        file = %report.file,
        read = report.rows_read,
        rejected = report.rows_rejected,
        "Seed file read"
    );
    Ok((records, report))
}

/// Keeps the first record for each key; later duplicates are rejected
fn dedupe<R, K: Ord>(records: Vec<R>, report: &mut LoadReport, key: impl Fn(&R) -> K) -> Vec<R> {
    let mut seen = BTreeSet::new();
    records
        .into_iter()
        .filter(|record| {
            let fresh = seen.insert(key(record));
            if !fresh {
                report.rows_rejected += 1;
                warn!(file = %report.file, "Rejected duplicate seed row");
            }
            fresh
        })
        .collect()
}

/// Loads the five seed files into a dataset
#[derive(Debug, Clone)]
pub struct SeedLoader {
    layout: SeedLayout,
    currency: Currency,
}

impl SeedLoader {
    pub fn new(dir: impl Into<PathBuf>, currency: Currency) -> Self {
        Self {
            layout: SeedLayout::new(dir),
            currency,
        }
    }

    pub fn with_layout(layout: SeedLayout, currency: Currency) -> Self {
        Self { layout, currency }
    }

    pub fn layout(&self) -> &SeedLayout {
        &self.layout
    }

    /// Claims of one type
    pub fn load_claims(&self, claim_type: ClaimType) -> Result<(Vec<ClaimRecord>, LoadReport), SeedError> {
        let currency = self.currency;
        read_rows(&self.layout.claims_path(claim_type), &CLAIM_COLUMNS, |row: ClaimRow| {
            row.into_record(claim_type, currency)
        })
    }

    /// Providers, one per NPI
    pub fn load_providers(&self) -> Result<(Vec<ProviderRecord>, LoadReport), SeedError> {
        let (providers, mut report) =
            read_rows(&self.layout.providers_path(), &PROVIDER_COLUMNS, ProviderRow::into_record)?;
        let providers = dedupe(providers, &mut report, |p: &ProviderRecord| p.npi.clone());
        Ok((providers, report))
    }

    /// Members, one per member id
    pub fn load_beneficiaries(&self) -> Result<(Vec<BeneficiaryRecord>, LoadReport), SeedError> {
        let (members, mut report) = read_rows(
            &self.layout.beneficiaries_path(),
            &BENEFICIARY_COLUMNS,
            BeneficiaryRow::into_record,
        )?;
        let members = dedupe(members, &mut report, |m: &BeneficiaryRecord| m.id.clone());
        Ok((members, report))
    }

    /// Loads every seed file, returning the dataset and per-file row counts
    pub fn load_with_report(&self) -> Result<(ClaimsDataset, Vec<LoadReport>), SeedError> {
        info!(dir = %self.layout.dir.display(), "Loading seed data");

        let mut claims = Vec::new();
        let mut reports = Vec::new();
        for claim_type in ClaimType::ALL {
            let (mut of_type, report) = self.load_claims(claim_type)?;
            claims.append(&mut of_type);
            reports.push(report);
        }
        let (providers, provider_report) = self.load_providers()?;
        let (beneficiaries, beneficiary_report) = self.load_beneficiaries()?;
        reports.push(provider_report);
        reports.push(beneficiary_report);

        let rejected: usize = reports.iter().map(|r| r.rows_rejected).sum();
        let dataset = ClaimsDataset::new(self.currency, claims, providers, beneficiaries)?
            .with_rejected_rows(rejected);

        info!(
            claims = dataset.claims().len(),
            providers = dataset.providers().len(),
            beneficiaries = dataset.beneficiaries().len(),
            rejected,
            "Seed data loaded"
        );
        Ok((dataset, reports))
    }

    /// Loads every seed file
    pub fn load(&self) -> Result<ClaimsDataset, SeedError> {
        self.load_with_report().map(|(dataset, _)| dataset)
    }
}
