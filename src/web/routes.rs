//! # Web API Route Definitions
//!
//! Routes are declared in one registration table, resolved at startup. The
//! table decides per environment which entries are mounted: API docs and the
//! GraphQL playground only exist outside production.

use axum::routing::{get, post, MethodRouter};
use axum::Router;
use tracing::debug;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Environment;
use crate::web::handlers;
use crate::web::openapi::ApiDoc;
use crate::web::state::AppState;

pub const API_PREFIX: &str = "/api";
pub const DOCS_PATH: &str = "/api-docs";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// One mounted route
pub struct RouteEntry {
    pub path: &'static str,
    pub method: &'static str,
    pub summary: &'static str,
    pub handler: MethodRouter<AppState>,
}

impl RouteEntry {
    fn new(
        path: &'static str,
        method: &'static str,
        summary: &'static str,
        handler: MethodRouter<AppState>,
    ) -> Self {
        Self {
            path,
            method,
            summary,
            handler,
        }
    }
}

impl std::fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .field("method", &self.method)
            .field("summary", &self.summary)
            .finish()
    }
}

/// REST and GraphQL routes for the given environment
pub fn route_table(environment: Environment) -> Vec<RouteEntry> {
    let mut table = vec![
        RouteEntry::new(API_PREFIX, "GET", "Service greeting", get(handlers::root::get_hello)),
        RouteEntry::new(
            "/api/health",
            "GET",
            "Aggregated health status",
            get(handlers::health::get_health),
        ),
        RouteEntry::new(
            handlers::graphql::GRAPHQL_PATH,
            "POST",
            "GraphQL endpoint",
            post(handlers::graphql::execute),
        ),
    ];

    if !environment.is_production() {
        table.push(RouteEntry::new(
            handlers::graphql::GRAPHQL_PATH,
            "GET",
            "GraphQL playground",
            get(handlers::graphql::playground),
        ));
    }

    table
}

/// API documentation routes, mounted outside production
///
/// - `/api-docs` - Swagger UI
/// - `/api-docs/openapi.json` - OpenAPI JSON document
pub fn docs_routes(environment: Environment) -> Option<Router<AppState>> {
    if environment.is_production() {
        return None;
    }
    debug!(path = DOCS_PATH, openapi = OPENAPI_PATH, "Registering API docs");
    Some(
        SwaggerUi::new(DOCS_PATH)
            .url(OPENAPI_PATH, ApiDoc::openapi())
            .into(),
    )
}

/// Mount every table entry on one router
///
/// Entries sharing a path are merged into a single method router so that
/// `GET` and `POST` on `/graphql` coexist.
pub fn build_router(table: Vec<RouteEntry>) -> Router<AppState> {
    let mut merged: Vec<(&'static str, MethodRouter<AppState>)> = Vec::new();

    for entry in table {
        debug!(
            method = entry.method,
            path = entry.path,
            summary = entry.summary,
            "Registering route"
        );
        match merged.iter_mut().find(|(path, _)| *path == entry.path) {
            Some((_, existing)) => {
                let current = std::mem::replace(existing, MethodRouter::new());
                *existing = current.merge(entry.handler);
            }
            None => merged.push((entry.path, entry.handler)),
        }
    }

    merged
        .into_iter()
        .fold(Router::new(), |router, (path, handler)| router.route(path, handler))
}
