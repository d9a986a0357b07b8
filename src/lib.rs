#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, GraphQL in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # GrowEase Core
//!
//! The GrowEase API service: health aggregation over dependency probes,
//! served over GraphQL and REST, plus a typed client that consumes it.
//!
//! ## Overview
//!
//! A health request fans out to every configured dependency prober (today:
//! the PostgreSQL pool), collects a `healthy`/`unhealthy` verdict per
//! dependency and folds them into one [`models::HealthStatus`] together with
//! process uptime. The same status is reachable at `POST /graphql`
//! (`query { health { ... } }`) and `GET /api/health`.
//!
//! ## Module Organization
//!
//! - [`health`] - Dependency probers and the health aggregator
//! - [`graphql`] - GraphQL schema exposing the `health` query
//! - [`web`] - Axum router, handlers, middleware and error envelope
//! - [`client`] - HTTP client and view model for consumers
//! - [`models`] - Wire types shared by both transports and the client
//! - [`database`] - PostgreSQL pool and its liveness check
//! - [`config`] - Layered configuration
//! - [`logging`] - Structured logging setup
//! - [`error`] - Crate error type
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//! use growease_core::config::AppConfig;
//! use growease_core::database::DatabaseConnection;
//! use growease_core::health::HealthService;
//!
//! # async fn example() -> growease_core::Result<()> {
//! let config = AppConfig::load()?;
//! let db = Arc::new(DatabaseConnection::connect(&config.database).await?);
//! let health = HealthService::for_database(
//!     db,
//!     Duration::from_millis(config.health.probe_timeout_ms),
//!     Instant::now(),
//! );
//!
//! let status = health.get_health().await;
//! println!("{}", serde_json::to_string_pretty(&status)?);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod graphql;
pub mod health;
pub mod logging;
pub mod models;
pub mod web;

pub use config::{AppConfig, Environment};
pub use error::{GrowEaseError, Result};
pub use health::HealthService;
pub use models::{HealthStatus, OverallStatus, Verdict};
