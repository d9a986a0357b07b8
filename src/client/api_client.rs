//! # Health API Client
//!
//! HTTP client for reading the service health over either transport. Both
//! paths produce the same [`HealthStatus`], so callers do not care which one
//! answered.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use super::error::{ClientError, ClientResult};
use crate::models::{ApiResponse, HealthStatus, OverallStatus, ServiceVerdicts, Verdict};

/// Query sent over the GraphQL transport; selects every field
pub const HEALTH_QUERY: &str = r#"
query Health {
  health {
    status
    timestamp
    uptime
    services {
      database
    }
  }
}
"#;

const REST_HEALTH_PATH: &str = "/api/health";
const GRAPHQL_PATH: &str = "/graphql";

/// Which protocol the client talks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    #[default]
    Graphql,
    Rest,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Graphql => "graphql",
            Self::Rest => "rest",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transport {
    type Err = ClientError;

    fn from_str(s: &str) -> ClientResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graphql" | "gql" => Ok(Self::Graphql),
            "rest" | "http" => Ok(Self::Rest),
            other => Err(ClientError::config_error(format!(
                "Unknown transport '{other}', expected 'graphql' or 'rest'"
            ))),
        }
    }
}

/// Configuration for the health API client
#[derive(Debug, Clone, PartialEq)]
pub struct HealthApiConfig {
    /// Base URL of the API server (e.g. `http://localhost:3001`)
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    pub transport: Transport,
}

impl Default for HealthApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            timeout_ms: 10_000,
            transport: Transport::default(),
        }
    }
}

impl HealthApiConfig {
    /// Defaults overridden by `GROWEASE_API_URL`, `GROWEASE_API_TRANSPORT`
    /// and `GROWEASE_API_TIMEOUT_MS`
    pub fn from_env() -> ClientResult<Self> {
        let mut config = Self::default();
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> ClientResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("GROWEASE_API_URL") {
            self.base_url = url;
        }
        if let Some(transport) = lookup("GROWEASE_API_TRANSPORT") {
            self.transport = transport.parse()?;
        }
        if let Some(timeout) = lookup("GROWEASE_API_TIMEOUT_MS") {
            if let Ok(timeout_ms) = timeout.parse() {
                self.timeout_ms = timeout_ms;
            }
        }
        Ok(())
    }
}

/// Anything the view model can pull a health status from
#[async_trait]
pub trait HealthSource: Send + Sync {
    async fn fetch_health(&self) -> ClientResult<HealthStatus>;
}

/// HTTP client for the health endpoints
pub struct HealthApiClient {
    client: Client,
    base_url: Url,
    config: HealthApiConfig,
}

impl fmt::Debug for HealthApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_ms", &self.config.timeout_ms)
            .field("transport", &self.config.transport)
            .finish()
    }
}

impl HealthApiClient {
    pub fn new(config: HealthApiConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ClientError::config_error(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(format!("growease-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::config_error(format!("Failed to create HTTP client: {e}")))?;

        info!(
            base_url = %base_url,
            transport = %config.transport,
            timeout_ms = config.timeout_ms,
            "Created HealthApiClient"
        );

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    pub fn transport(&self) -> Transport {
        self.config.transport
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::config_error(format!("Invalid URL: {e}")))
    }

    /// Fetch through the configured transport
    pub async fn get_health(&self) -> ClientResult<HealthStatus> {
        match self.config.transport {
            Transport::Graphql => self.get_health_graphql().await,
            Transport::Rest => self.get_health_rest().await,
        }
    }

    /// GET /api/health
    pub async fn get_health_rest(&self) -> ClientResult<HealthStatus> {
        let url = self.endpoint(REST_HEALTH_PATH)?;
        debug!("Getting health from: {}", url);

        let response = self.client.get(url).send().await?;
        let response = Self::ensure_success(response).await?;

        let health: HealthStatus = Self::decode(response).await?;
        debug!(status = %health.status.as_str(), "Retrieved health over REST");
        Ok(health)
    }

    /// POST /graphql with [`HEALTH_QUERY`]
    pub async fn get_health_graphql(&self) -> ClientResult<HealthStatus> {
        let url = self.endpoint(GRAPHQL_PATH)?;
        debug!("Querying health from: {}", url);

        let body = json!({ "query": HEALTH_QUERY, "operationName": "Health" });
        let response = self.client.post(url).json(&body).send().await?;
        let response = Self::ensure_success(response).await?;

        let payload: GraphqlResponse = Self::decode(response).await?;
        if let Some(first) = payload.errors.into_iter().next() {
            error!(message = %first.message, "GraphQL health query returned errors");
            return Err(ClientError::GraphqlError {
                message: first.message,
                code: first
                    .extensions
                    .and_then(|ext| ext.get("code").and_then(Value::as_str).map(String::from)),
            });
        }

        let health = payload
            .data
            .and_then(|data| data.health)
            .ok_or_else(|| ClientError::invalid_response("data.health", "missing from response"))?
            .into_status()?;

        debug!(status = %health.status.as_str(), "Retrieved health over GraphQL");
        Ok(health)
    }

    /// Read the body and decode it; a body that is not the expected JSON is a
    /// serialization error rather than a transport one
    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let text = response.text().await?;
        decode_body(&text)
    }

    /// Turn a non-2xx response into an error carrying the envelope message
    async fn ensure_success(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiResponse<Value>>(&text)
            .ok()
            .and_then(|envelope| envelope.error)
            .map(|err| err.message)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        error!(status = status.as_u16(), %message, "Health request failed");
        Err(ClientError::api_error(status.as_u16(), message))
    }
}

fn decode_body<T: DeserializeOwned>(text: &str) -> ClientResult<T> {
    serde_json::from_str(text).map_err(|e| {
        error!(error = %e, "Health response body could not be decoded");
        ClientError::from(e)
    })
}

#[async_trait]
impl HealthSource for HealthApiClient {
    async fn fetch_health(&self) -> ClientResult<HealthStatus> {
        self.get_health().await
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<GraphqlData>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlData {
    health: Option<GraphqlHealth>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
    extensions: Option<Value>,
}

/// GraphQL shape: nullable service fields instead of an absent key
#[derive(Debug, Deserialize)]
struct GraphqlHealth {
    status: OverallStatus,
    timestamp: String,
    uptime: Option<u64>,
    services: Option<BTreeMap<String, Option<Verdict>>>,
}

impl GraphqlHealth {
    fn into_status(self) -> ClientResult<HealthStatus> {
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .map_err(|e| ClientError::invalid_response("timestamp", e.to_string()))?
            .with_timezone(&Utc);

        let services = self.services.map(|services| {
            services
                .into_iter()
                .filter_map(|(name, verdict)| verdict.map(|v| (name, v)))
                .collect::<ServiceVerdicts>()
        });

        Ok(HealthStatus {
            status: self.status,
            timestamp,
            uptime: self.uptime,
            services,
        })
    }
}
