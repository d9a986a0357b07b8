//! Uniform error envelope across failure sources

use std::time::Duration;

use crate::common::{assert_error_envelope, test_config, StubDatabase, TestServer};
use growease_core::config::Environment;

#[tokio::test]
async fn test_unknown_route_returns_not_found_envelope() {
    let server = TestServer::start().await;

    let response = server.client().get("/api/does-not-exist").await;
    let error = assert_error_envelope(response, 404, "NOT_FOUND").await;

    assert_eq!(error["message"], "Resource not found");
    assert_eq!(error["path"], "/api/does-not-exist");
    assert!(error["timestamp"].as_str().is_some_and(|t| t.ends_with('Z')));

    server.shutdown().await;
}

#[tokio::test]
async fn test_wrong_method_returns_envelope() {
    let server = TestServer::start().await;

    let response = server
        .client()
        .post_json("/api/health", &serde_json::json!({}))
        .await;
    assert_error_envelope(response, 405, "METHOD_NOT_ALLOWED").await;

    server.shutdown().await;
}

#[tokio::test]
async fn test_production_hides_diagnostics() {
    let server = TestServer::start_with(
        test_config(Environment::Production),
        StubDatabase::reachable(),
    )
    .await;

    let response = server.client().get("/api/does-not-exist").await;
    let error = assert_error_envelope(response, 404, "NOT_FOUND").await;

    assert!(error.get("path").is_none(), "no path in production: {error}");
    assert!(error.get("timestamp").is_none(), "no timestamp in production: {error}");

    server.shutdown().await;
}

#[tokio::test]
async fn test_production_disables_docs_and_playground() {
    let server = TestServer::start_with(
        test_config(Environment::Production),
        StubDatabase::reachable(),
    )
    .await;
    let client = server.client();

    assert_error_envelope(client.get("/api-docs/openapi.json").await, 404, "NOT_FOUND").await;
    assert_error_envelope(client.get("/api-docs").await, 404, "NOT_FOUND").await;
    assert_error_envelope(client.get("/graphql").await, 405, "METHOD_NOT_ALLOWED").await;

    // The API itself stays up
    assert_eq!(client.get("/api/health").await.status().as_u16(), 200);

    server.shutdown().await;
}

#[tokio::test]
async fn test_request_timeout_returns_envelope() {
    let mut config = test_config(Environment::Test);
    config.server.request_timeout_ms = 100;
    config.health.probe_timeout_ms = 5_000;
    let server = TestServer::start_with(config, StubDatabase::slow(Duration::from_secs(2))).await;

    let response = server.client().get("/api/health").await;
    assert_error_envelope(response, 408, "TIMEOUT").await;

    server.shutdown().await;
}
