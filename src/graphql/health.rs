use async_graphql::{Context, Object};
use std::sync::Arc;

use crate::health::{HealthService, DATABASE_SERVICE};
use crate::models::{format_timestamp, HealthStatus, ServiceVerdicts};

pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// Health check endpoint for monitoring
    async fn health(&self, ctx: &Context<'_>) -> async_graphql::Result<HealthStatusObject> {
        let service = ctx.data::<Arc<HealthService>>()?;
        Ok(HealthStatusObject(service.get_health().await))
    }
}

/// GraphQL view of [`HealthStatus`]
pub struct HealthStatusObject(pub HealthStatus);

#[Object(name = "HealthStatus")]
impl HealthStatusObject {
    /// `ok` or `error`
    async fn status(&self) -> &str {
        self.0.status.as_str()
    }

    /// ISO-8601 evaluation time
    async fn timestamp(&self) -> String {
        format_timestamp(&self.0.timestamp)
    }

    /// Seconds since process start
    async fn uptime(&self) -> Option<u64> {
        self.0.uptime
    }

    async fn services(&self) -> Option<HealthServicesObject> {
        self.0.services.clone().map(HealthServicesObject)
    }
}

/// Per-dependency verdicts
pub struct HealthServicesObject(pub ServiceVerdicts);

#[Object(name = "HealthServices")]
impl HealthServicesObject {
    /// `healthy` or `unhealthy`
    async fn database(&self) -> Option<&str> {
        self.0.get(DATABASE_SERVICE).map(|v| v.as_str())
    }
}
