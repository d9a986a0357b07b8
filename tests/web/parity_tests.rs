//! REST and GraphQL return the same health data
//!
//! Both transports go through one `HealthService`; back-to-back calls must
//! agree on status and services, and on time within a small epsilon.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::common::{assert_json_response, test_config, StubDatabase, TestServer};
use growease_core::client::HEALTH_QUERY;
use growease_core::config::Environment;

fn timestamp(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|raw| raw.parse().ok())
        .expect("ISO-8601 timestamp")
}

async fn assert_parity(server: &TestServer) {
    let client = server.client();

    let rest = assert_json_response(client.get("/api/health").await, 200).await;
    let graphql = client.graphql(HEALTH_QUERY).await;
    let gql = &graphql["data"]["health"];

    assert_eq!(rest["status"], gql["status"], "status parity");
    assert_eq!(rest["services"], gql["services"], "services parity");

    let rest_uptime = rest["uptime"].as_u64().expect("REST uptime");
    let gql_uptime = gql["uptime"].as_u64().expect("GraphQL uptime");
    assert!(gql_uptime >= rest_uptime && gql_uptime - rest_uptime <= 1);

    let delta = timestamp(&gql["timestamp"]) - timestamp(&rest["timestamp"]);
    assert!(delta.num_milliseconds().abs() < 2_000, "timestamps {delta}");
}

#[tokio::test]
async fn test_parity_when_healthy() {
    let server = TestServer::start().await;
    assert_parity(&server).await;
    server.shutdown().await;
}

#[tokio::test]
async fn test_parity_when_unhealthy() {
    let server =
        TestServer::start_with(test_config(Environment::Test), StubDatabase::unreachable()).await;
    assert_parity(&server).await;
    server.shutdown().await;
}
