//! # Health Subsystem
//!
//! Dependency probing and status aggregation, independent of any transport.
//!
//! - [`prober`] - [`DependencyProber`] turns a [`LivenessCheck`] into a [`Verdict`](crate::models::Verdict)
//! - [`service`] - [`HealthService`] aggregates verdicts and uptime into a
//!   [`HealthStatus`](crate::models::HealthStatus)
//!
//! Both the GraphQL resolver and the REST handler call the same
//! [`HealthService::get_health`], so the two transports can never disagree.

pub mod prober;
pub mod service;

pub use prober::{DependencyProber, LivenessCheck, DATABASE_SERVICE};
pub use service::HealthService;
