//! GraphQL transport

use crate::common::{assert_json_response, test_config, StubDatabase, TestServer};
use growease_core::client::HEALTH_QUERY;
use growease_core::config::Environment;

#[tokio::test]
async fn test_full_health_query() {
    let server = TestServer::start().await;

    let body = server.client().graphql(HEALTH_QUERY).await;

    assert!(body.get("errors").is_none(), "no errors: {body}");
    let health = &body["data"]["health"];
    assert_eq!(health["status"], "ok");
    assert_eq!(health["services"]["database"], "healthy");
    assert!(health["uptime"].as_u64().is_some());
    assert!(health["timestamp"].as_str().is_some_and(|t| t.ends_with('Z')));

    server.shutdown().await;
}

#[tokio::test]
async fn test_field_selection_returns_only_requested_fields() {
    let server = TestServer::start().await;

    let body = server.client().graphql("{ health { status } }").await;

    assert!(body.get("errors").is_none(), "no errors: {body}");
    assert_eq!(body["data"], serde_json::json!({ "health": { "status": "ok" } }));

    server.shutdown().await;
}

#[tokio::test]
async fn test_unhealthy_database_over_graphql() {
    let server =
        TestServer::start_with(test_config(Environment::Test), StubDatabase::unreachable()).await;

    let body = server
        .client()
        .graphql("{ health { status services { database } } }")
        .await;

    assert_eq!(body["data"]["health"]["status"], "error");
    assert_eq!(body["data"]["health"]["services"]["database"], "unhealthy");

    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_field_reports_error_with_default_code() {
    let server = TestServer::start().await;

    let body = server.client().graphql("{ health { bogus } }").await;

    let errors = body["errors"].as_array().expect("errors array");
    assert!(!errors.is_empty());
    assert!(errors[0]["message"].as_str().is_some_and(|m| m.contains("bogus")));
    assert_eq!(errors[0]["extensions"]["code"], "INTERNAL_ERROR");

    server.shutdown().await;
}

#[tokio::test]
async fn test_malformed_graphql_body_gets_error_envelope() {
    let server = TestServer::start().await;

    let response = server
        .client()
        .post_raw("/graphql", "application/json", "{ not json")
        .await;
    let body = assert_json_response(response, 400).await;

    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["message"], "Malformed request body");

    server.shutdown().await;
}

#[tokio::test]
async fn test_playground_served_outside_production() {
    let server = TestServer::start().await;

    let response = server.client().get("/graphql").await;
    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.expect("html body");
    assert!(html.contains("graphiql"), "GraphiQL page");

    server.shutdown().await;
}

#[tokio::test]
async fn test_introspection_available_outside_production() {
    let server = TestServer::start().await;

    let body = server
        .client()
        .graphql("{ __schema { queryType { name } } }")
        .await;

    assert!(body.get("errors").is_none(), "no errors: {body}");
    assert_eq!(body["data"]["__schema"]["queryType"]["name"], "Query");

    server.shutdown().await;
}

#[tokio::test]
async fn test_production_disables_introspection() {
    let server = TestServer::start_with(
        test_config(Environment::Production),
        StubDatabase::reachable(),
    )
    .await;
    let client = server.client();

    let body = client.graphql("{ __schema { queryType { name } } }").await;
    let errors = body["errors"].as_array().expect("errors array");
    assert!(!errors.is_empty(), "introspection refused: {body}");
    assert!(body["data"]["__schema"].is_null(), "no schema data: {body}");

    let body = client.graphql("{ health { status } }").await;
    assert_eq!(body["data"]["health"]["status"], "ok");

    server.shutdown().await;
}
