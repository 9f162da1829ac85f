//! JSON access to the served report

use axum::{extract::State, Json};

use domain_reporting::ReportDocument;
use crate::{error::DashboardError, AppState};

/// Returns the cached report document
pub async fn get_report(State(state): State<AppState>) -> Result<Json<ReportDocument>, DashboardError> {
    let document = state.cache.get()?;
    Ok(Json(ReportDocument::clone(&document)))
}
