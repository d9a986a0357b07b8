//! # GraphQL API
//!
//! Code-first GraphQL schema served at `/graphql`. Field selection is native:
//! a caller asking for `{ health { status } }` gets exactly that.
//!
//! Every error in a response carries `extensions.code`; errors the executor
//! raised without one are tagged `INTERNAL_ERROR`. Introspection is off in
//! production.

mod health;

use async_graphql::{EmptyMutation, EmptySubscription, Schema};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{error, warn};

pub use health::{HealthServicesObject, HealthStatusObject, QueryRoot};

use crate::config::Environment;
use crate::health::{HealthService, DATABASE_SERVICE};

/// Code used when an error does not specify one
pub const DEFAULT_ERROR_CODE: &str = "INTERNAL_ERROR";

/// Dependencies exposed as fields of `HealthServices`
///
/// Each prober name needs a resolver on [`HealthServicesObject`]; a prober
/// without one shows up over REST but not over GraphQL.
pub const SERVICE_FIELDS: &[&str] = &[DATABASE_SERVICE];

pub type HealthSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the schema with the shared health service as context data
pub fn build_schema(health: Arc<HealthService>, environment: Environment) -> HealthSchema {
    for name in health.dependency_names() {
        if !SERVICE_FIELDS.contains(&name) {
            warn!(
                dependency = name,
                "Dependency has no HealthServices field and is missing from GraphQL"
            );
        }
    }

    let builder = Schema::build(QueryRoot, EmptyMutation, EmptySubscription).data(health);
    if environment.is_production() {
        builder.disable_introspection().finish()
    } else {
        builder.finish()
    }
}

/// Serialize an executor response, filling in default error codes
pub fn into_json(response: async_graphql::Response) -> Value {
    let mut body = match serde_json::to_value(&response) {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "Failed to serialize GraphQL response");
            return json!({
                "data": null,
                "errors": [{
                    "message": "An unexpected error occurred",
                    "extensions": { "code": DEFAULT_ERROR_CODE }
                }]
            });
        }
    };

    if let Some(errors) = body.get_mut("errors").and_then(Value::as_array_mut) {
        for err in errors.iter_mut() {
            apply_default_code(err);
        }
        warn!(error_count = errors.len(), "GraphQL request completed with errors");
    }

    body
}

fn apply_default_code(err: &mut Value) {
    let Some(obj) = err.as_object_mut() else {
        return;
    };
    let extensions = obj
        .entry("extensions")
        .or_insert_with(|| Value::Object(Map::new()));
    if let Some(ext) = extensions.as_object_mut() {
        ext.entry("code")
            .or_insert_with(|| Value::String(DEFAULT_ERROR_CODE.to_string()));
    }
}
