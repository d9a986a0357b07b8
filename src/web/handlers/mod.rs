//! # Web API Request Handlers
//!
//! Contains all HTTP request handlers organized by functional area.

pub mod graphql;
pub mod health;
pub mod root;

use crate::web::errors::ApiError;

/// Router fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
