//! Claims Analytics - Dashboard Server Binary
//!
//! Serves the latest generated report as an HTML dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin claims-dashboard
//!
//! # Run with environment variables
//! DASHBOARD_PORT=8080 DASHBOARD_REPORT_PATH=reports/claims_report_latest.json cargo run --bin claims-dashboard
//! ```
//!
//! # Environment Variables
//!
//! * `DASHBOARD_HOST` - Server host (default: 0.0.0.0)
//! * `DASHBOARD_PORT` - Server port (default: 8501)
//! * `DASHBOARD_REPORT_PATH` - Report document to serve (default: reports/claims_report_latest.json)
//! * `DASHBOARD_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `DASHBOARD_DISPLAY__TITLE`, `DASHBOARD_DISPLAY__FOOTER`, ... - Display text overrides

use anyhow::Context;
use interface_dashboard::{create_router, AppState, DashboardConfig};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the dashboard server.
///
/// Loads configuration, initializes logging, and serves until Ctrl+C or
/// SIGTERM. A missing report file does not stop the server; pages show an
/// error until the report is generated.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = DashboardConfig::from_env().context("Invalid DASHBOARD_* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        report = %config.report_path.display(),
        "Starting claims dashboard"
    );

    let state = AppState::new(&config).context("Failed to prepare page templates")?;
    if let Err(e) = state.cache.get() {
        tracing::warn!(error = %e, "Report document not available yet");
    }

    let app = create_router(state);
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
