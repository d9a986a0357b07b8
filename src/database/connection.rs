use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{error, info};

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::health::LivenessCheck;

pub struct DatabaseConnection {
    pool: PgPool,
}

impl std::fmt::Debug for DatabaseConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConnection")
            .field("pool_size", &self.pool.size())
            .field("closed", &self.pool.is_closed())
            .finish()
    }
}

impl DatabaseConnection {
    /// Open the pool and verify the database is reachable
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        match Self::pool_options(config).connect(&config.url).await {
            Ok(pool) => {
                info!(
                    max_connections = config.max_connections,
                    "Database connected successfully"
                );
                Ok(Self { pool })
            }
            Err(e) => {
                error!(error = %e, "Database connection failed");
                Err(e.into())
            }
        }
    }

    /// Create the pool without connecting; connections open on first use
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self> {
        let pool = Self::pool_options(config).connect_lazy(&config.url)?;
        Ok(Self { pool })
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_millis(config.acquire_timeout_ms))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every connection in the pool
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

#[async_trait]
impl LivenessCheck for DatabaseConnection {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
