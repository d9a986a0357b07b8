//! # OpenAPI Documentation
//!
//! OpenAPI document for the REST surface, generated with utoipa. Served at
//! `/api-docs/openapi.json`, with Swagger UI at `/api-docs`, outside
//! production.

use utoipa::OpenApi;

use crate::models::{ApiErrorBody, AppMessage, HealthStatus, OverallStatus, Verdict};
use crate::web::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root::get_hello,
        handlers::health::get_health,
    ),
    components(schemas(
        HealthStatus,
        OverallStatus,
        Verdict,
        AppMessage,
        ApiErrorBody,
    )),
    tags(
        (name = "App", description = "Service root"),
        (name = "Health", description = "Service and dependency health"),
    ),
    info(
        title = "GrowEase API",
        version = "1.0",
        description = "The GrowEase API description",
    )
)]
pub struct ApiDoc;
