//! # Error Types
//!
//! Crate-wide error type for configuration, database access and server I/O.
//! Web-facing errors live in [`crate::web::errors`] and client errors in
//! [`crate::client::error`].

use thiserror::Error;

/// Errors raised by the GrowEase core library
#[derive(Debug, Error)]
pub enum GrowEaseError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Dependency check timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server I/O error: {0}")]
    Server(#[from] std::io::Error),
}

impl GrowEaseError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

impl From<config::ConfigError> for GrowEaseError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GrowEaseError>;
