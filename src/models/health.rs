//! # Health Status Model
//!
//! The health payload returned by both the GraphQL and REST transports.
//! A `HealthStatus` is built fresh for every request and never mutated.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

/// Outcome of a single dependency probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Healthy,
    Unhealthy,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall system status derived from the dependency verdicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Ok,
    Error,
}

impl OverallStatus {
    /// `Ok` iff every verdict is healthy. An empty set is `Ok`.
    pub fn from_verdicts<'a, I>(verdicts: I) -> Self
    where
        I: IntoIterator<Item = &'a Verdict>,
    {
        if verdicts.into_iter().all(Verdict::is_healthy) {
            Self::Ok
        } else {
            Self::Error
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-dependency verdicts keyed by service name, iterated in name order
pub type ServiceVerdicts = BTreeMap<String, Verdict>;

/// Health status payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// `ok` when every service is healthy, `error` otherwise
    pub status: OverallStatus,

    /// Time the status was evaluated
    #[serde(with = "iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,

    /// Seconds since process start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,

    /// Dependency verdicts, e.g. `{"database": "healthy"}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub services: Option<ServiceVerdicts>,
}

impl HealthStatus {
    /// Assemble a status, deriving `status` from the service verdicts
    pub fn evaluate(
        services: ServiceVerdicts,
        uptime: Option<u64>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            status: OverallStatus::from_verdicts(services.values()),
            timestamp,
            uptime,
            services: Some(services),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == OverallStatus::Ok
    }

    /// Verdict for a named service, if that service was checked
    pub fn service(&self, name: &str) -> Option<Verdict> {
        self.services.as_ref().and_then(|s| s.get(name).copied())
    }
}

/// Format a timestamp the way both transports emit it (`2026-10-18T12:00:00.123Z`)
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

mod iso8601 {
    use super::format_timestamp;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
