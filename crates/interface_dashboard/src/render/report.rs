//! Standalone HTML report
//!
//! The exported report shows every dashboard page in order, with the
//! stylesheet inlined and no navigation, so the file can be opened or
//! printed without the server.

use domain_reporting::ReportDocument;
use crate::config::DisplayConfig;
use crate::error::DashboardError;
use crate::viewmodel::build_all_pages;
use super::Renderer;

/// Renders `document` as one self-contained HTML page
pub fn render_report_html(document: &ReportDocument, display: &DisplayConfig) -> Result<String, DashboardError> {
    let renderer = Renderer::new(display.clone())?;
    let pages = build_all_pages(document, renderer.display());
    renderer.render_report(document, &pages)
}
