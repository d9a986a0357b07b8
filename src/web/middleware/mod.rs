//! # Web API Middleware
//!
//! Middleware stack for the web API: request ids, error envelopes, panic
//! recovery, timeouts, CORS and request tracing.

pub mod error_envelope;
pub mod request_id;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware;
use axum::Router;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;
use crate::web::state::AppState;

/// Apply the middleware stack for a router with app state
///
/// Layers from outermost to innermost:
/// 1. Request tracing
/// 2. CORS handling
/// 3. Request ID generation
/// 4. Error envelope formatting and error logging
/// 5. Request timeout
/// 6. Panic recovery
pub fn apply_middleware_stack(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let request_timeout = Duration::from_millis(state.config.server.request_timeout_ms);

    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&state.config.server))
        .layer(middleware::from_fn(request_id::add_request_id))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error_envelope::format_error_response,
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(CatchPanicLayer::custom(error_envelope::handle_panic));

    router.layer(layers)
}

/// CORS for the configured front-end origin, with credentials
fn create_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = match HeaderValue::from_str(&config.cors_origin) {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(e) => {
            warn!(
                origin = %config.cors_origin,
                error = %e,
                "Invalid CORS origin; cross-origin requests will be rejected"
            );
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}
