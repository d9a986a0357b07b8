//! # Web API Application State
//!
//! Shared state handed to every handler: configuration, the health service
//! and the GraphQL schema built on top of it.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::graphql::{build_schema, HealthSchema};
use crate::health::HealthService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub health: Arc<HealthService>,
    pub schema: HealthSchema,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("environment", &self.config.environment)
            .field("health", &self.health)
            .finish()
    }
}

impl AppState {
    pub fn new(config: AppConfig, health: Arc<HealthService>) -> Self {
        let schema = build_schema(health.clone(), config.environment);
        Self {
            config: Arc::new(config),
            health,
            schema,
        }
    }

    pub fn is_production(&self) -> bool {
        self.config.environment.is_production()
    }
}
