//! Redis-based cache backend.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{
    redis::{cmd, AsyncCommands},
    Config, Pool, PoolConfig, Runtime,
};
use hospeda_config::RedisConfig;
use hospeda_core::{HospedaError, HospedaResult};
use hospeda_resilience::with_timeout;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Keys requested per SCAN round trip during pattern deletes.
const SCAN_BATCH: usize = 100;

/// Redis-based cache service.
pub struct RedisCacheService {
    /// `None` when Redis is disabled in configuration.
    pool: Option<Arc<Pool>>,
    /// Deadline for each SCAN or DEL round trip of a pattern delete.
    command_timeout: Duration,
}

impl RedisCacheService {
    /// Creates a cache service over an existing pool.
    #[must_use]
    pub fn new(pool: Arc<Pool>, command_timeout: Duration) -> Self {
        Self {
            pool: Some(pool),
            command_timeout,
        }
    }

    /// Creates a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            command_timeout: RedisConfig::default().command_timeout(),
        }
    }

    /// Builds the connection pool without touching the server.
    ///
    /// Reachability is checked by `CacheGateway::connect`. An unreachable
    /// server is not fatal: connections are retried on demand.
    pub async fn connect(config: &RedisConfig) -> HospedaResult<Self> {
        if !config.enabled {
            info!("Redis cache disabled by configuration");
            return Ok(Self::disabled());
        }

        let mut redis_cfg = Config::from_url(&config.url);
        redis_cfg.pool = Some(PoolConfig::new(config.pool_size));
        let pool = redis_cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| HospedaError::Cache(format!("Failed to create Redis pool: {e}")))?;

        info!("Redis cache pool created for {}", config.url);
        Ok(Self::new(Arc::new(pool), config.command_timeout()))
    }

    /// Closes the pool; subsequent calls fail and are treated as misses.
    pub fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close();
            info!("Redis cache pool closed");
        }
    }

    async fn get_conn(&self) -> HospedaResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                HospedaError::Cache(format!("Failed to get Redis connection: {e}"))
            }),
            None => Err(HospedaError::Cache("Cache is disabled".to_string())),
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.as_ref().is_some_and(|pool| !pool.is_closed())
    }

    async fn get_raw(&self, key: &str) -> HospedaResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            HospedaError::Cache(format!("Failed to get key '{key}': {e}"))
        })?;

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> HospedaResult<()> {
        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
            HospedaError::Cache(format!("Failed to set key '{key}': {e}"))
        })?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> HospedaResult<bool> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            HospedaError::Cache(format!("Failed to delete key '{key}': {e}"))
        })?;

        Ok(deleted > 0)
    }

    async fn delete_pattern(&self, pattern: &str) -> HospedaResult<u64> {
        let mut conn = self.get_conn().await?;
        let mut cursor: u64 = 0;
        let mut total: u64 = 0;

        // SCAN instead of KEYS so large keyspaces don't block the server.
        // Each round trip gets its own deadline; the caller bounds the loop.
        loop {
            let scan = async {
                let page: (u64, Vec<String>) = cmd("SCAN")
                    .arg(cursor)
                    .arg("MATCH")
                    .arg(pattern)
                    .arg("COUNT")
                    .arg(SCAN_BATCH)
                    .query_async(&mut conn)
                    .await
                    .map_err(|e| HospedaError::Cache(format!("Failed to scan '{pattern}': {e}")))?;
                Ok::<_, HospedaError>(page)
            };
            let (next, keys) = with_timeout(self.command_timeout, "scan", scan).await?;

            if !keys.is_empty() {
                let del = async {
                    let deleted: u64 = conn.del(&keys).await.map_err(|e| {
                        HospedaError::Cache(format!("Failed to delete keys for '{pattern}': {e}"))
                    })?;
                    Ok::<_, HospedaError>(deleted)
                };
                total += with_timeout(self.command_timeout, "del", del).await?;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("Deleted {} keys matching pattern '{}'", total, pattern);
        Ok(total)
    }

    async fn ping(&self) -> HospedaResult<()> {
        let mut conn = self.get_conn().await?;
        let _: String = cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| HospedaError::Cache(format!("Redis PING failed: {e}")))?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_cache() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_cache_reports_errors() {
        let cache = RedisCacheService::disabled();
        assert!(matches!(cache.get_raw("user:1").await, Err(HospedaError::Cache(_))));
        assert!(cache.ping().await.is_err());
    }

    #[tokio::test]
    async fn test_connect_honours_enabled_flag() {
        let config = RedisConfig {
            enabled: false,
            ..RedisConfig::default()
        };
        let cache = RedisCacheService::connect(&config).await.unwrap();
        assert!(!cache.is_enabled());
    }

    #[tokio::test]
    async fn test_close_disables_cache() {
        let config = RedisConfig {
            url: "redis://127.0.0.1:1".to_string(),
            command_timeout_ms: 100,
            ..RedisConfig::default()
        };
        let cache = RedisCacheService::connect(&config).await.unwrap();
        assert!(cache.is_enabled());

        cache.close();
        assert!(!cache.is_enabled());
    }
}
