//! # Web API Error Types
//!
//! Defines error types specific to the web API and their HTTP response conversions.
//! Every error renders the uniform `{ success: false, error: { message, code } }`
//! envelope; the error-envelope middleware adds request diagnostics.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use thiserror::Error;

use crate::models::{ApiErrorBody, ApiResponse};

/// Web API specific errors with HTTP status code mappings
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,

    #[error("Invalid request: {message}")]
    BadRequest {
        message: String,
        details: Option<Value>,
    },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request timeout")]
    Timeout,

    /// Details stay in the logs; callers only see a generic message
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create a BadRequest error with a custom message
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            details: None,
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound => "NOT_FOUND",
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ApiError::Timeout => "TIMEOUT",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The caller-facing body
    pub fn body(&self) -> ApiErrorBody {
        let message = match self {
            ApiError::BadRequest { message, .. } => message.clone(),
            ApiError::Internal(_) => "An unexpected error occurred".to_string(),
            other => other.to_string(),
        };
        let details = match self {
            ApiError::BadRequest { details, .. } => details.clone(),
            _ => None,
        };
        ApiErrorBody::new(message, self.error_code()).with_details(details)
    }

    /// Envelope for a bare error status produced outside a handler
    pub fn body_for_status(status: StatusCode) -> ApiErrorBody {
        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound.body(),
            StatusCode::METHOD_NOT_ALLOWED => ApiError::MethodNotAllowed.body(),
            StatusCode::REQUEST_TIMEOUT => ApiError::Timeout.body(),
            s if s.is_client_error() => ApiErrorBody::new(
                s.canonical_reason().unwrap_or("Invalid request"),
                "BAD_REQUEST",
            ),
            _ => ApiError::internal_server_error(status.to_string()).body(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = self.body();
        let mut response =
            (self.status_code(), Json(ApiResponse::<()>::failure(body.clone()))).into_response();
        // Picked up by the error-envelope middleware for logging and diagnostics
        response.extensions_mut().insert(body);
        if let ApiError::Internal(detail) = &self {
            response.extensions_mut().insert(InternalDetail(detail.clone()));
        }
        response
    }
}

/// Technical detail of an internal error, for logs only
#[derive(Debug, Clone)]
pub struct InternalDetail(pub String);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: "Malformed request body".to_string(),
            details: Some(Value::String(rejection.body_text())),
        }
    }
}

/// Result type alias for web API operations
pub type ApiResult<T> = Result<T, ApiError>;
