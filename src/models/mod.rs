//! # Models
//!
//! Wire-level data types shared by the server transports and the client.
//!
//! - [`health`] - `HealthStatus` and its verdict enums
//! - [`api_response`] - the uniform `ApiResponse` envelope and root message

pub mod api_response;
pub mod health;

pub use api_response::{ApiErrorBody, ApiResponse, AppMessage};
pub use health::{format_timestamp, HealthStatus, OverallStatus, ServiceVerdicts, Verdict};
