//! # Health Client
//!
//! Consumer side of the health check: an HTTP client that reads the status
//! over GraphQL or REST, and a view model that turns the result into a
//! loading / error / success presentation.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use growease_core::client::{HealthApiClient, HealthApiConfig, HealthCheckView};
//!
//! # async fn run() -> Result<(), growease_core::client::ClientError> {
//! let client = HealthApiClient::new(HealthApiConfig::from_env()?)?;
//! let mut view = HealthCheckView::new(Arc::new(client));
//! view.load().await;
//! println!("{}", view.render());
//! # Ok(())
//! # }
//! ```

pub mod api_client;
pub mod error;
pub mod view;

pub use api_client::{HealthApiClient, HealthApiConfig, HealthSource, Transport, HEALTH_QUERY};
pub use error::{ClientError, ClientResult};
pub use view::{format_uptime, Action, HealthCheckView, RenderedView, Tone, ViewState};
