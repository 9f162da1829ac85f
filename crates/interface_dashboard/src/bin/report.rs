//! Claims Analytics - Report Generator Binary
//!
//! Loads the seed CSV files, aggregates them into a report document, and
//! writes it as JSON and/or HTML.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin claims-report -- --seed-dir seeds --output-dir reports
//! cargo run --bin claims-report -- --format json --as-of 2024-01-15
//! ```
//!
//! Report thresholds come from `--config` (TOML) and `CLAIMS_REPORT__*`
//! environment variables, e.g. `CLAIMS_REPORT__RISK__HIGH_PERCENTILE=85`.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interface_dashboard::config::{load_report_config, DashboardConfig};
use interface_dashboard::export::{run_export, ExportRequest, OutputFormat};

/// Generate the claims analytics report
#[derive(Debug, Parser)]
#[command(name = "claims-report", version, about)]
struct Cli {
    /// Output format: json, html, or both
    #[arg(long, default_value_t = OutputFormat::Both)]
    format: OutputFormat,

    /// Directory holding the seed CSV files
    #[arg(long, default_value = "seeds")]
    seed_dir: PathBuf,

    /// Directory the report files are written to
    #[arg(long, default_value = "reports")]
    output_dir: PathBuf,

    /// Report configuration file (TOML)
    #[arg(long, env = "CLAIMS_REPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Report date, YYYY-MM-DD (default: today)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Log pipeline detail
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let report = load_report_config(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load report configuration from {}", path.display()),
        None => "Failed to load report configuration".to_string(),
    })?;
    let display = DashboardConfig::from_env()
        .context("Invalid DASHBOARD_* configuration")?
        .display;

    let request = ExportRequest {
        seed_dir: cli.seed_dir,
        output_dir: cli.output_dir,
        format: cli.format,
        as_of: cli.as_of.unwrap_or_else(|| Local::now().date_naive()),
        report,
        display,
    };
    let summary = run_export(&request)
        .with_context(|| format!("Failed to generate report from {}", request.seed_dir.display()))?;

    for load in &summary.loads {
        if load.rows_rejected > 0 {
            tracing::warn!(file = %load.file, rejected = load.rows_rejected, "Seed rows skipped");
        }
    }
    let metrics = &summary.document.executive_summary.key_metrics;
    println!(
        "Report generated: {} claims, {} members, {} providers",
        metrics.total_claims, metrics.total_beneficiaries, metrics.total_providers
    );
    for path in summary.written() {
        println!("  {}", path.display());
    }
    Ok(())
}
