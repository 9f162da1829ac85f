//! Dashboard error handling
//!
//! Errors surface to the browser as HTML pages; the server keeps running.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, warn};

use domain_reporting::ReportError;
use infra_files::SeedError;

const ERROR_TEMPLATE: &str = include_str!("../templates/error.hbs");

/// Dashboard error types
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Report document not found: {}", path.display())]
    DocumentNotFound { path: PathBuf },

    #[error("Report document {} does not match the expected schema: {detail}", path.display())]
    SchemaMismatch { path: PathBuf, detail: String },

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Template error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Seed data error: {0}")]
    Seed(#[from] SeedError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl DashboardError {
    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::DocumentNotFound { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::UnknownPage(_) => StatusCode::NOT_FOUND,
            DashboardError::SchemaMismatch { .. }
            | DashboardError::Render(_)
            | DashboardError::Io(_)
            | DashboardError::Seed(_)
            | DashboardError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the person looking at the dashboard
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::DocumentNotFound { .. } => {
                "Report data file not found. Please generate the report first.".to_string()
            }
            DashboardError::SchemaMismatch { .. } => {
                "Report data file could not be read. Please regenerate the report.".to_string()
            }
            DashboardError::UnknownPage(page) => format!("There is no dashboard page named '{}'.", page),
            _ => "The dashboard could not display this page.".to_string(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            DashboardError::DocumentNotFound { .. } => "document_not_found",
            DashboardError::SchemaMismatch { .. } => "schema_mismatch",
            DashboardError::UnknownPage(_) => "unknown_page",
            DashboardError::Render(_) => "render_error",
            DashboardError::Io(_) => "io_error",
            DashboardError::Seed(_) => "seed_error",
            DashboardError::Report(_) => "report_error",
        }
    }
}

impl From<handlebars::RenderError> for DashboardError {
    fn from(err: handlebars::RenderError) -> Self {
        DashboardError::Render(err.to_string())
    }
}

impl From<handlebars::TemplateError> for DashboardError {
    fn from(err: handlebars::TemplateError) -> Self {
        DashboardError::Render(err.to_string())
    }
}

/// Error page body
#[derive(Debug, Serialize)]
struct ErrorPage<'a> {
    status: u16,
    kind: &'a str,
    message: String,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Dashboard request failed");
        } else {
            warn!(error = %self, "Dashboard request rejected");
        }

        let page = ErrorPage {
            status: status.as_u16(),
            kind: self.kind(),
            message: self.user_message(),
        };
        match handlebars::Handlebars::new().render_template(ERROR_TEMPLATE, &page) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, page.message).into_response(),
        }
    }
}
