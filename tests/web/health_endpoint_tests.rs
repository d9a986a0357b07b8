//! REST health and root endpoints

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::common::{assert_json_response, started_ago, test_config, StubDatabase, TestServer};
use growease_core::config::Environment;

#[tokio::test]
async fn test_health_ok_when_database_reachable() {
    let server = TestServer::start().await;
    let client = server.client();

    let body = assert_json_response(client.get("/api/health").await, 200).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["services"]["database"], "healthy");
    assert!(body["uptime"].as_u64().is_some(), "uptime present: {body}");

    let timestamp = body["timestamp"].as_str().expect("timestamp string");
    assert!(timestamp.ends_with('Z'), "UTC suffix: {timestamp}");
    let parsed: DateTime<Utc> = timestamp.parse().expect("ISO-8601 timestamp");
    assert!((Utc::now() - parsed).num_seconds().abs() < 5);

    server.shutdown().await;
}

#[tokio::test]
async fn test_health_still_200_when_database_unreachable() {
    let server =
        TestServer::start_with(test_config(Environment::Test), StubDatabase::unreachable()).await;

    let response = server.client().get("/api/health").await;
    let body = assert_json_response(response, 200).await;

    assert_eq!(body["status"], "error");
    assert_eq!(body["services"]["database"], "unhealthy");

    server.shutdown().await;
}

#[tokio::test]
async fn test_health_follows_database_recovery() {
    let server =
        TestServer::start_with(test_config(Environment::Test), StubDatabase::unreachable()).await;
    let client = server.client();

    let before = assert_json_response(client.get("/api/health").await, 200).await;
    assert_eq!(before["status"], "error");

    server.database.set_reachable(true);

    let after = assert_json_response(client.get("/api/health").await, 200).await;
    assert_eq!(after["status"], "ok");
    assert_eq!(server.database.ping_count(), 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_slow_probe_reports_unhealthy_after_probe_timeout() {
    let mut config = test_config(Environment::Test);
    config.health.probe_timeout_ms = 100;
    let server = TestServer::start_with(config, StubDatabase::slow(Duration::from_secs(2))).await;

    let body = assert_json_response(server.client().get("/api/health").await, 200).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["services"]["database"], "unhealthy");

    server.shutdown().await;
}

#[tokio::test]
async fn test_uptime_reflects_process_start() {
    let Some(start_time) = started_ago(Duration::from_secs(125)) else {
        return;
    };
    let server =
        TestServer::start_at(test_config(Environment::Test), StubDatabase::reachable(), start_time)
            .await;

    let body = assert_json_response(server.client().get("/api/health").await, 200).await;
    let uptime = body["uptime"].as_u64().expect("uptime");
    assert!((125..=126).contains(&uptime), "uptime {uptime}");

    server.shutdown().await;
}

#[tokio::test]
async fn test_root_greeting() {
    let server = TestServer::start().await;

    let body = assert_json_response(server.client().get("/api").await, 200).await;
    assert_eq!(body, serde_json::json!({ "message": "Hello from GrowEase API!" }));

    server.shutdown().await;
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = TestServer::start().await;

    let response = server.client().get("/api/health").await;
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header");
    assert!(!request_id.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_openapi_document_served_outside_production() {
    let server = TestServer::start().await;

    let body = assert_json_response(server.client().get("/api-docs/openapi.json").await, 200).await;
    assert_eq!(body["info"]["title"], "GrowEase API");
    assert!(body["paths"]["/api/health"]["get"].is_object());

    server.shutdown().await;
}

#[tokio::test]
async fn test_swagger_ui_served_outside_production() {
    let server = TestServer::start_with(
        test_config(Environment::Development),
        StubDatabase::reachable(),
    )
    .await;

    // /api-docs redirects to the UI index; reqwest follows it
    let response = server.client().get("/api-docs").await;
    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.expect("html body");
    assert!(html.to_lowercase().contains("swagger"), "Swagger UI page");

    server.shutdown().await;
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let server = TestServer::start().await;

    let response = reqwest::Client::new()
        .get(format!("{}/api/health", server.base_url))
        .header(reqwest::header::ORIGIN, "http://localhost:3000")
        .send()
        .await
        .expect("request");

    let headers = response.headers();
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
    assert_eq!(
        headers
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );

    server.shutdown().await;
}
