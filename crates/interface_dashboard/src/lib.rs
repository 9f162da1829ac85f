//! Dashboard and report export layer
//!
//! Serves a generated report document as a navigable HTML dashboard and
//! drives the report export pipeline used by the `claims-report` binary.
//!
//! # Architecture
//!
//! - **Cache**: the report document, reloaded when the file changes
//! - **View models**: each page as formatted cards, tables, and charts
//! - **Render**: Handlebars templates turning view models into HTML
//! - **Handlers**: pages, navigation, refresh, health, JSON access
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_dashboard::{create_router, AppState};
//!
//! let state = AppState::new(&config)?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod middleware;
pub mod navigation;
pub mod render;
pub mod viewmodel;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::cache::DocumentCache;
use crate::handlers::{api, health, pages};
use crate::middleware::request_logging;
use crate::render::Renderer;

pub use cache::load_document;
pub use config::{DashboardConfig, DisplayConfig};
pub use error::DashboardError;
pub use navigation::Page;
pub use render::report::render_report_html;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<DocumentCache>,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Result<Self, DashboardError> {
        Ok(Self {
            cache: Arc::new(DocumentCache::new(config.report_path.clone())),
            renderer: Arc::new(Renderer::new(config.display.clone())?),
        })
    }
}

/// Creates the dashboard router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/nav/:page", get(pages::navigate))
        .route("/pages/:page", get(pages::show_page))
        .route("/refresh", post(pages::refresh))
        .route("/health", get(health::health_check))
        .route("/api/report", get(api::get_report))
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
