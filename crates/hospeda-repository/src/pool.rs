//! MySQL connection pool shared by the four repositories.

use async_trait::async_trait;
use hospeda_config::DatabaseConfig;
use hospeda_core::{HealthCheck, HealthStatus, HospedaError, HospedaResult};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::{sync::Arc, time::Duration};
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    max_connections: u32,
}

impl DatabasePool {
    pub async fn connect(config: &DatabaseConfig) -> HospedaResult<Self> {
        debug!(
            min = config.min_connections,
            max = config.max_connections,
            "Opening MySQL pool"
        );

        let pool = MySqlPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect(&config.url)
            .await
            .map_err(|e| HospedaError::Database(format!("Failed to connect: {e}")))?;

        info!(max = config.max_connections, "MySQL pool ready");
        Ok(Self {
            pool,
            max_connections: config.max_connections,
        })
    }

    /// Retries [`Self::connect`] once per second, for databases that are
    /// still starting up next to the server.
    pub async fn connect_with_retry(config: &DatabaseConfig, attempts: u32) -> HospedaResult<Self> {
        let mut attempt = 1;
        loop {
            match Self::connect(config).await {
                Ok(pool) => return Ok(pool),
                Err(e) if attempt < attempts => {
                    warn!(attempt, "MySQL not reachable yet: {}", e);
                    attempt += 1;
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    #[must_use]
    pub fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    pub async fn ping(&self) -> HospedaResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| HospedaError::Database(format!("Ping failed: {e}")))
    }

    /// Applies `migrations/` (users, properties, bookings, reviews).
    pub async fn run_migrations(&self) -> HospedaResult<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| HospedaError::Database(format!("Migration failed: {e}")))?;
        info!("Schema migrations applied");
        Ok(())
    }

    /// True when every connection is checked out.
    fn saturated(&self) -> bool {
        self.pool.size() >= self.max_connections && self.pool.num_idle() == 0
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("MySQL pool closed");
    }
}

#[async_trait]
impl HealthCheck for DatabasePool {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        if let Err(e) = self.ping().await {
            return HealthStatus::Unhealthy(e.to_string());
        }
        if self.saturated() {
            HealthStatus::Degraded(format!("all {} connections in use", self.max_connections))
        } else {
            HealthStatus::Healthy
        }
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("idle", &self.pool.num_idle())
            .field("max", &self.max_connections)
            .finish()
    }
}

/// Connects (with startup retries) and shares the pool.
pub async fn create_pool(config: &DatabaseConfig) -> HospedaResult<Arc<DatabasePool>> {
    const STARTUP_ATTEMPTS: u32 = 5;
    DatabasePool::connect_with_retry(config, STARTUP_ATTEMPTS)
        .await
        .map(Arc::new)
}
