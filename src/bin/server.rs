//! # GrowEase API Server
//!
//! Standalone server binary: loads configuration, connects the database,
//! and serves the REST and GraphQL endpoints until Ctrl+C or SIGTERM.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin growease-server
//!
//! # Run against a specific database in production mode
//! APP_ENV=production DATABASE_URL=postgresql://... cargo run --bin growease-server
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use growease_core::config::AppConfig;
use growease_core::database::DatabaseConnection;
use growease_core::health::HealthService;
use growease_core::logging;
use growease_core::web::{self, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Captured before anything else so uptime covers startup
    let start_time = Instant::now();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_structured_logging(&config.logging, config.environment);

    info!("Starting GrowEase API server");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));
    info!("   Environment: {}", config.environment);
    info!(config = ?config.sanitized(), "Configuration loaded");

    let database = Arc::new(
        DatabaseConnection::connect(&config.database)
            .await
            .context("Failed to connect to database")?,
    );

    let health = Arc::new(HealthService::for_database(
        database.clone(),
        Duration::from_millis(config.health.probe_timeout_ms),
        start_time,
    ));

    let bind_address = config.server.bind_address();
    let result = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            let state = AppState::new(config, health);
            web::serve(listener, state, shutdown_signal())
                .await
                .context("Web server failed")
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!("Failed to bind {bind_address}"))),
    };

    // Closed on every exit path once the server has stopped
    database.close().await;

    match &result {
        Ok(()) => info!("GrowEase API server shutdown complete"),
        Err(e) => error!(error = %format!("{e:#}"), "GrowEase API server stopped with error"),
    }
    result
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
