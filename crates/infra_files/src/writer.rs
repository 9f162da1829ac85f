//! Report output
//!
//! Reports are written as `claims_report_<YYYY-MM-DD>.json` and `.html`,
//! dated by the report's generation date. The JSON is also copied to
//! [`LATEST_REPORT_FILE`], the file the dashboard reads by default.

use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use domain_reporting::ReportDocument;
use crate::error::SeedError;

/// File name of the most recently written JSON report
pub const LATEST_REPORT_FILE: &str = "claims_report_latest.json";

const REPORT_PREFIX: &str = "claims_report";

/// Writes reports into one output directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn json_path(&self, date: NaiveDate) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.json", REPORT_PREFIX, date.format("%Y-%m-%d")))
    }

    pub fn html_path(&self, date: NaiveDate) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.html", REPORT_PREFIX, date.format("%Y-%m-%d")))
    }

    pub fn latest_path(&self) -> PathBuf {
        self.output_dir.join(LATEST_REPORT_FILE)
    }

    fn ensure_dir(&self) -> Result<(), SeedError> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Replaces `path` with a single rename; readers never see a partial
    /// file. The staging file lives next to the target.
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), SeedError> {
        let mut staged = NamedTempFile::new_in(&self.output_dir)?;
        staged.write_all(contents.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|e| e.error)?;
        debug!(path = %path.display(), "Report file replaced");
        Ok(())
    }

    /// Writes the dated JSON report and refreshes the latest copy.
    ///
    /// Returns the dated path.
    pub fn write_json(&self, document: &ReportDocument) -> Result<PathBuf, SeedError> {
        self.ensure_dir()?;
        let json = document.to_json_pretty()?;
        let path = self.json_path(document.executive_summary.report_metadata.generated_date);

        self.write_atomic(&path, &json)?;
        self.write_atomic(&self.latest_path(), &json)?;
        info!(path = %path.display(), bytes = json.len(), "JSON report written");
        Ok(path)
    }

    /// Writes an already rendered HTML report for `date`
    pub fn write_html(&self, date: NaiveDate, html: &str) -> Result<PathBuf, SeedError> {
        self.ensure_dir()?;
        let path = self.html_path(date);
        self.write_atomic(&path, html)?;
        info!(path = %path.display(), bytes = html.len(), "HTML report written");
        Ok(path)
    }
}
