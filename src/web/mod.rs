//! # Web API Module
//!
//! Axum-based HTTP surface of the service: the REST endpoints under `/api`,
//! the GraphQL endpoint at `/graphql`, and the non-production API docs.
//!
//! ## Core Components
//!
//! - [`routes`] - Route registration table
//! - [`handlers`] - Request handlers for each endpoint group
//! - [`middleware`] - Request ids, error envelope, timeouts, CORS, tracing
//! - [`state`] - Shared application state
//! - [`errors`] - Web error type and its envelope rendering
//! - [`openapi`] - OpenAPI document for the REST surface

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::error::Result;
use state::AppState;

/// Create the main Axum application with all routes and middleware
pub fn create_app(app_state: AppState) -> Router {
    let environment = app_state.config.environment;
    let mut router = routes::build_router(routes::route_table(environment));
    if let Some(docs) = routes::docs_routes(environment) {
        router = router.merge(docs);
    }
    let router = router.fallback(handlers::not_found);

    middleware::apply_middleware_stack(router, &app_state).with_state(app_state)
}

/// Serve the application on `listener` until `shutdown` resolves
///
/// In-flight requests are allowed to finish once shutdown starts.
pub async fn serve<F>(listener: TcpListener, app_state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let environment = app_state.config.environment;
    let app = create_app(app_state);

    info!(
        address = %listener.local_addr()?,
        environment = %environment,
        "Web API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Web API stopped");
    Ok(())
}
