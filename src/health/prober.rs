//! # Dependency Prober
//!
//! Issues one liveness check against one dependency and reduces the outcome
//! to a verdict. Failures are logged, never returned.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error};

use crate::error::{GrowEaseError, Result};
use crate::models::Verdict;

/// Service name used for the primary database
pub const DATABASE_SERVICE: &str = "database";

/// A dependency that supports a cheap no-op liveness operation
#[async_trait]
pub trait LivenessCheck: Send + Sync {
    async fn ping(&self) -> Result<()>;
}

/// Probes one named dependency
#[derive(Clone)]
pub struct DependencyProber {
    name: String,
    check: Arc<dyn LivenessCheck>,
    timeout: Duration,
}

impl std::fmt::Debug for DependencyProber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyProber")
            .field("name", &self.name)
            .field("timeout_ms", &self.timeout.as_millis())
            .finish()
    }
}

impl DependencyProber {
    pub fn new(name: impl Into<String>, check: Arc<dyn LivenessCheck>, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            check,
            timeout,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the liveness check once. No retries.
    pub async fn probe(&self) -> Verdict {
        let start = Instant::now();
        let outcome = tokio::time::timeout(self.timeout, self.check.ping()).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(())) => {
                debug!(
                    dependency = %self.name,
                    duration_ms = duration_ms,
                    "Dependency health check succeeded"
                );
                Verdict::Healthy
            }
            Ok(Err(e)) => {
                error!(
                    dependency = %self.name,
                    error = %e,
                    duration_ms = duration_ms,
                    "Dependency health check failed"
                );
                Verdict::Unhealthy
            }
            Err(_elapsed) => {
                let e = GrowEaseError::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                };
                error!(
                    dependency = %self.name,
                    error = %e,
                    "Dependency health check timed out"
                );
                Verdict::Unhealthy
            }
        }
    }
}
