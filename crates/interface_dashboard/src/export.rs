//! Report export pipeline
//!
//! Seeds are loaded, aggregated into a `ReportDocument`, and written as
//! JSON, HTML, or both.

use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use domain_reporting::{ReportAggregator, ReportConfig, ReportDocument};
use infra_files::{LoadReport, ReportWriter, SeedLoader};
use crate::config::DisplayConfig;
use crate::error::DashboardError;
use crate::render::report::render_report_html;

/// Which report files to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    Html,
    #[default]
    Both,
}

impl OutputFormat {
    pub fn writes_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    pub fn writes_html(&self) -> bool {
        matches!(self, OutputFormat::Html | OutputFormat::Both)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            "both" => Ok(OutputFormat::Both),
            other => Err(format!("unknown format '{}', expected json, html, or both", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
            OutputFormat::Both => "both",
        })
    }
}

/// Inputs for one export run
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub seed_dir: PathBuf,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub as_of: NaiveDate,
    pub report: ReportConfig,
    pub display: DisplayConfig,
}

/// What an export run produced
#[derive(Debug)]
pub struct ExportSummary {
    pub document: ReportDocument,
    pub loads: Vec<LoadReport>,
    pub json_path: Option<PathBuf>,
    pub html_path: Option<PathBuf>,
}

impl ExportSummary {
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.json_path.iter().chain(self.html_path.iter()).map(PathBuf::as_path)
    }
}

/// Runs the full seed-to-report pipeline
pub fn run_export(request: &ExportRequest) -> Result<ExportSummary, DashboardError> {
    let aggregator = ReportAggregator::new(request.report.clone())?;
    let (dataset, loads) = SeedLoader::new(&request.seed_dir, request.report.currency).load_with_report()?;
    let document = aggregator.generate(&dataset, request.as_of)?;

    let writer = ReportWriter::new(&request.output_dir);
    let json_path = if request.format.writes_json() {
        Some(writer.write_json(&document)?)
    } else {
        None
    };
    let html_path = if request.format.writes_html() {
        let html = render_report_html(&document, &request.display)?;
        Some(writer.write_html(request.as_of, &html)?)
    } else {
        None
    };

    info!(
        format = %request.format,
        output_dir = %request.output_dir.display(),
        "Report export complete"
    );
    Ok(ExportSummary {
        document,
        loads,
        json_path,
        html_path,
    })
}
