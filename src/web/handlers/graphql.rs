//! # GraphQL Handlers
//!
//! `POST /graphql` executes a request against the shared schema. Outside
//! production, `GET /graphql` serves an interactive GraphiQL page.

use async_graphql::http::GraphiQLSource;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde_json::Value;
use tracing::debug;

use crate::graphql;
use crate::web::errors::ApiResult;
use crate::web::state::AppState;

pub const GRAPHQL_PATH: &str = "/graphql";

/// Execute a GraphQL request: POST /graphql
///
/// Query-level failures come back as `200` with an `errors` array. A body
/// that is not a GraphQL request is rejected with the REST error envelope.
pub async fn execute(
    State(state): State<AppState>,
    payload: Result<Json<async_graphql::Request>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload?;
    debug!(
        operation = request.operation_name.as_deref().unwrap_or("anonymous"),
        "Executing GraphQL request"
    );

    let response = state.schema.execute(request).await;
    Ok(Json(graphql::into_json(response)))
}

/// Interactive explorer: GET /graphql
pub async fn playground() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
