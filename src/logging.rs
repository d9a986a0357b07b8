//! # Structured Logging Module
//!
//! Environment-aware structured logging to the console and, optionally, a
//! JSON log file for post-mortem debugging of request failures.

use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{Environment, LoggingConfig};

static LOGGER_INITIALIZED: OnceLock<Option<WorkerGuard>> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_structured_logging(config: &LoggingConfig, environment: Environment) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let log_level = config
            .level
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| get_log_level(environment).to_string());

        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true)
            .with_ansi(!environment.is_production())
            .with_filter(EnvFilter::new(log_level.clone()));

        let pid = process::id();
        let (file_layer, guard, log_path) = match prepare_log_file(config, environment, pid) {
            Some((dir, file_name)) => {
                let appender = tracing_appender::rolling::never(&dir, &file_name);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_level(true)
                    .with_ansi(false)
                    .json()
                    .with_filter(EnvFilter::new(log_level));
                (Some(layer), Some(guard), Some(dir.join(file_name)))
            }
            None => (None, None, None),
        };

        // A subscriber may already be installed by a test harness
        if tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .is_err()
        {
            tracing::debug!("Global tracing subscriber already initialized");
        }

        tracing::info!(
            pid = pid,
            environment = %environment,
            log_file = ?log_path,
            "Structured logging initialized"
        );

        guard
    });
}

fn prepare_log_file(
    config: &LoggingConfig,
    environment: Environment,
    pid: u32,
) -> Option<(PathBuf, String)> {
    let dir = PathBuf::from(config.directory.as_ref()?);
    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!(
            "Unable to create log directory {}: {e}; logging to console only",
            dir.display()
        );
        return None;
    }

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    Some((dir, format!("{environment}.{pid}.{timestamp}.log")))
}

/// Default log filter for an environment
fn get_log_level(environment: Environment) -> &'static str {
    match environment {
        Environment::Development => "debug",
        Environment::Test => "debug",
        Environment::Production => "info",
    }
}

/// Log a failed request or operation with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "Operation failed"
    );
}
