//! # Error Envelope Middleware
//!
//! Outermost request-handling boundary for failures. Every 4xx/5xx response,
//! whether produced by a handler, the router fallback, the timeout layer or a
//! caught panic, leaves as the uniform envelope:
//!
//! ```json
//! { "success": false, "error": { "message": "...", "code": "...", "path": "...", "timestamp": "..." } }
//! ```
//!
//! `path` and `timestamp` are only added outside production. Technical
//! details are logged here and never sent to the caller.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use std::any::Any;
use tracing::warn;

use super::request_id::RequestId;
use crate::logging;
use crate::models::{format_timestamp, ApiErrorBody, ApiResponse};
use crate::web::errors::{ApiError, InternalDetail};
use crate::web::state::AppState;

pub async fn format_error_response(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request.extensions().get::<RequestId>().cloned();

    let response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let body = response
        .extensions()
        .get::<ApiErrorBody>()
        .cloned()
        .unwrap_or_else(|| ApiError::body_for_status(status));
    let detail = response.extensions().get::<InternalDetail>().cloned();

    if status.is_server_error() {
        logging::log_error(
            "web",
            &format!("{method} {path} - {}", status.as_u16()),
            detail.as_ref().map_or(body.message.as_str(), |d| d.0.as_str()),
            request_id.as_ref().map(RequestId::as_str),
        );
    } else {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            code = body.code.as_deref().unwrap_or_default(),
            request_id = request_id.as_ref().map(RequestId::as_str),
            "{}",
            body.message
        );
    }

    let body = if state.is_production() {
        body
    } else {
        body.with_diagnostics(path, format_timestamp(&Utc::now()))
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.remove(header::CONTENT_TYPE);
    (parts, Json(ApiResponse::<()>::failure(body))).into_response()
}

/// Convert a handler panic into an internal error response
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::internal_server_error(format!("handler panicked: {detail}")).into_response()
}
