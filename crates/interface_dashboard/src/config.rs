//! Dashboard and report configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use core_kernel::Currency;
use domain_reporting::ReportConfig;
use infra_files::LATEST_REPORT_FILE;

/// Environment prefix for dashboard settings (`DASHBOARD_PORT`, ...)
pub const DASHBOARD_ENV_PREFIX: &str = "DASHBOARD";
/// Environment prefix for report settings (`CLAIMS_REPORT__RISK__HIGH_PERCENTILE`, ...)
pub const REPORT_ENV_PREFIX: &str = "CLAIMS_REPORT";

/// Dashboard server configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Report document the dashboard serves
    pub report_path: PathBuf,
    /// Log level
    pub log_level: String,
    /// Labels and fallback text
    pub display: DisplayConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            report_path: Path::new("reports").join(LATEST_REPORT_FILE),
            log_level: "info".to_string(),
            display: DisplayConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Loads configuration from `DASHBOARD_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::with_prefix(DASHBOARD_ENV_PREFIX))
    }

    /// Loads configuration from the given environment source.
    ///
    /// Nested display settings use a double underscore:
    /// `DASHBOARD_DISPLAY__TITLE`.
    pub fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment.prefix_separator("_").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Labels and fallback text used when rendering pages
///
/// Every piece of text shown in place of a missing value comes from here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Heading shown on every page
    pub title: String,
    /// Overrides the symbol of the document's currency
    pub currency_symbol: Option<String>,
    /// Shown for values the document does not carry
    pub not_available: String,
    /// Shown in place of an empty table
    pub empty_table: String,
    /// Shown on the recommendations page when there are none
    pub no_recommendations: String,
    /// Page footer
    pub footer: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Claims Data Warehouse - Business Intelligence Dashboard".to_string(),
            currency_symbol: None,
            not_available: "N/A".to_string(),
            empty_table: "No data available".to_string(),
            no_recommendations: "No recommendations for this reporting period.".to_string(),
            footer: "Claims Data Warehouse - Healthcare Analytics Platform".to_string(),
        }
    }
}

impl DisplayConfig {
    /// Symbol printed before monetary values
    pub fn currency_symbol(&self, currency: Currency) -> String {
        self.currency_symbol
            .clone()
            .unwrap_or_else(|| currency.symbol().to_string())
    }
}

/// Loads the report configuration.
///
/// Starts from the defaults, applies the TOML file at `path` when given, then
/// `CLAIMS_REPORT__*` environment overrides.
pub fn load_report_config(path: Option<&Path>) -> Result<ReportConfig, config::ConfigError> {
    load_report_config_from(
        path,
        config::Environment::with_prefix(REPORT_ENV_PREFIX).separator("__"),
    )
}

/// Loads the report configuration from an explicit environment source
pub fn load_report_config_from(
    path: Option<&Path>,
    environment: config::Environment,
) -> Result<ReportConfig, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }
    builder.add_source(environment).build()?.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_dashboard_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8501");
        assert_eq!(config.report_path, PathBuf::from("reports/claims_report_latest.json"));
    }

    #[test]
    fn test_dashboard_from_environment() {
        let source = config::Environment::with_prefix(DASHBOARD_ENV_PREFIX).source(Some(env(&[
            ("DASHBOARD_PORT", "9000"),
            ("DASHBOARD_REPORT_PATH", "/tmp/report.json"),
            ("DASHBOARD_DISPLAY__NOT_AVAILABLE", "-"),
        ])));
        let config = DashboardConfig::from_environment(source).unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.report_path, PathBuf::from("/tmp/report.json"));
        assert_eq!(config.display.not_available, "-");
        assert_eq!(config.display.footer, DisplayConfig::default().footer);
    }

    #[test]
    fn test_currency_symbol_override() {
        let mut display = DisplayConfig::default();
        assert_eq!(display.currency_symbol(Currency::EUR), "€");
        display.currency_symbol = Some("USD ".to_string());
        assert_eq!(display.currency_symbol(Currency::EUR), "USD ");
    }

    #[test]
    fn test_report_config_from_file_and_env() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.toml");
        std::fs::write(&path, "prepared_by = \"QA\"\n\n[risk]\nhigh_percentile = 80\n").unwrap();

        let source = config::Environment::with_prefix(REPORT_ENV_PREFIX)
            .separator("__")
            .source(Some(env(&[("CLAIMS_REPORT__PROVIDERS__TOP_N", "3")])));
        let config = load_report_config_from(Some(&path), source).unwrap();

        assert_eq!(config.prepared_by, "QA");
        assert_eq!(config.risk.high_percentile, dec!(80));
        assert_eq!(config.risk.medium_percentile, dec!(65));
        assert_eq!(config.providers.top_n, 3);
    }

    #[test]
    fn test_report_config_missing_file() {
        let result = load_report_config_from(
            Some(Path::new("/nonexistent/report.toml")),
            config::Environment::with_prefix(REPORT_ENV_PREFIX).source(Some(HashMap::new())),
        );
        assert!(result.is_err());
    }
}
