//! # Health Service
//!
//! Health aggregation independent of the HTTP layer, shared by the GraphQL
//! resolver, the REST handler and anything else that needs a status.

use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use super::prober::{DependencyProber, LivenessCheck, DATABASE_SERVICE};
use crate::models::{HealthStatus, ServiceVerdicts};

/// Health Service
///
/// Owns the process start instant and one prober per dependency.
///
/// ## Example
///
/// ```ignore
/// let service = HealthService::new(
///     vec![DependencyProber::new("database", db, Duration::from_secs(5))],
///     Instant::now(),
/// );
///
/// let status = service.get_health().await;
/// ```
pub struct HealthService {
    probers: Vec<DependencyProber>,

    /// Process start time for uptime calculation
    start_time: Instant,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("probers", &self.probers)
            .field("uptime_seconds", &self.uptime_seconds())
            .finish()
    }
}

impl HealthService {
    pub fn new(probers: Vec<DependencyProber>, start_time: Instant) -> Self {
        Self {
            probers,
            start_time,
        }
    }

    /// Service with the database as its only dependency
    pub fn for_database(
        database: Arc<dyn LivenessCheck>,
        probe_timeout: Duration,
        start_time: Instant,
    ) -> Self {
        Self::new(
            vec![DependencyProber::new(DATABASE_SERVICE, database, probe_timeout)],
            start_time,
        )
    }

    /// Whole seconds since process start
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Names of the configured dependencies
    pub fn dependency_names(&self) -> Vec<&str> {
        self.probers.iter().map(DependencyProber::name).collect()
    }

    /// Probe every dependency and assemble a fresh status. Never fails.
    pub async fn get_health(&self) -> HealthStatus {
        debug!(dependencies = self.probers.len(), "Performing health check");

        let verdicts = join_all(
            self.probers
                .iter()
                .map(|prober| async move { (prober.name().to_string(), prober.probe().await) }),
        )
        .await;

        let services: ServiceVerdicts = verdicts.into_iter().collect();
        HealthStatus::evaluate(services, Some(self.uptime_seconds()), Utc::now())
    }
}
