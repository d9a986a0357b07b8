//! # Integration Test Infrastructure
//!
//! Starts the real router on an ephemeral port with a controllable database
//! stand-in, plus a thin reqwest wrapper for calling it.

#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use growease_core::config::{AppConfig, Environment};
use growease_core::error::{GrowEaseError, Result};
use growease_core::health::{HealthService, LivenessCheck};
use growease_core::web::{self, state::AppState};

/// Database stand-in whose reachability can be flipped mid-test
#[derive(Debug)]
pub struct StubDatabase {
    reachable: AtomicBool,
    delay: Duration,
    pings: AtomicUsize,
}

impl StubDatabase {
    pub fn reachable() -> Arc<Self> {
        Self::with(true, Duration::ZERO)
    }

    pub fn unreachable() -> Arc<Self> {
        Self::with(false, Duration::ZERO)
    }

    /// Reachable, but every ping takes `delay`
    pub fn slow(delay: Duration) -> Arc<Self> {
        Self::with(true, delay)
    }

    fn with(reachable: bool, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reachable: AtomicBool::new(reachable),
            delay,
            pings: AtomicUsize::new(0),
        })
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    pub fn ping_count(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LivenessCheck for StubDatabase {
    async fn ping(&self) -> Result<()> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(GrowEaseError::Database(sqlx::Error::PoolTimedOut))
        }
    }
}

/// An instant `uptime` in the past
///
/// `None` when the monotonic clock has not run that long yet, e.g. on a
/// freshly booted host; callers skip the test in that case.
pub fn started_ago(uptime: Duration) -> Option<Instant> {
    let start = Instant::now().checked_sub(uptime);
    if start.is_none() {
        eprintln!("skipping: monotonic clock is younger than {uptime:?}");
    }
    start
}

/// Configuration used by integration tests
pub fn test_config(environment: Environment) -> AppConfig {
    let mut config = AppConfig::default();
    config.environment = environment;
    config.health.probe_timeout_ms = 500;
    config
}

/// A running server for one test
#[derive(Debug)]
pub struct TestServer {
    pub base_url: String,
    pub database: Arc<StubDatabase>,
    handle: JoinHandle<()>,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl TestServer {
    /// Start in the test environment with a reachable database
    pub async fn start() -> Self {
        Self::start_with(test_config(Environment::Test), StubDatabase::reachable()).await
    }

    pub async fn start_with(config: AppConfig, database: Arc<StubDatabase>) -> Self {
        Self::start_at(config, database, Instant::now()).await
    }

    /// Start with the process start time set to `start_time`
    pub async fn start_at(
        config: AppConfig,
        database: Arc<StubDatabase>,
        start_time: Instant,
    ) -> Self {
        let health = Arc::new(HealthService::for_database(
            database.clone(),
            Duration::from_millis(config.health.probe_timeout_ms),
            start_time,
        ));
        let state = AppState::new(config, health);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let port = listener.local_addr().expect("local addr").port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let handle = tokio::spawn(async move {
            web::serve(listener, state, async {
                let _ = shutdown_rx.await;
            })
            .await
            .expect("test server failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            database,
            handle,
            shutdown_tx,
        }
    }

    pub fn client(&self) -> WebTestClient {
        WebTestClient::new(&self.base_url)
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server stopped in time")
            .expect("server task completed");
    }
}

/// Raw HTTP access to a test server
#[derive(Debug, Clone)]
pub struct WebTestClient {
    client: Client,
    base_url: String,
}

impl WebTestClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("build reqwest client");
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .expect("POST request")
    }

    pub async fn post_raw(&self, path: &str, content_type: &str, body: &str) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body.to_string())
            .send()
            .await
            .expect("POST request")
    }

    /// Run a GraphQL query and return the decoded response body
    pub async fn graphql(&self, query: &str) -> Value {
        let response = self
            .post_json("/graphql", &serde_json::json!({ "query": query }))
            .await;
        assert_eq!(response.status().as_u16(), 200, "GraphQL transport status");
        response.json().await.expect("GraphQL JSON body")
    }
}

/// Assert the status code and decode the JSON body
pub async fn assert_json_response(response: reqwest::Response, expected_status: u16) -> Value {
    assert_eq!(
        response.status().as_u16(),
        expected_status,
        "Unexpected status code"
    );
    response.json().await.expect("JSON body")
}

/// Assert the uniform error envelope and return its `error` object
pub async fn assert_error_envelope(
    response: reqwest::Response,
    expected_status: u16,
    expected_code: &str,
) -> Value {
    let body = assert_json_response(response, expected_status).await;
    assert_eq!(body["success"], false, "envelope success flag: {body}");
    let error = body["error"].clone();
    assert_eq!(error["code"], expected_code, "envelope code: {body}");
    assert!(error["message"].is_string(), "envelope message: {body}");
    error
}
