//! # Health Check Handlers
//!
//! REST exposure of the health service. Delegates to the same
//! [`HealthService`](crate::health::HealthService) the GraphQL resolver uses.

use axum::extract::State;
use axum::Json;

use crate::models::HealthStatus;
use crate::web::state::AppState;

/// Health check endpoint: GET /api/health
///
/// Returns `200` with the full status even when a dependency is down; the
/// payload's `status` field carries the outcome.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Health status retrieved successfully", body = HealthStatus)
    ),
    tag = "Health"
)]
pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.health.get_health().await)
}
