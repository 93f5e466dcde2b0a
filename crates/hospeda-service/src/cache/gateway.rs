//! Cache gateway: the only path from services to the cache backend.
//!
//! Every backend failure (connection, command, timeout, serialization) is
//! logged and converted to a miss or `false`. Nothing here returns an error.

use super::invalidation::{patterns_for, EntityKind, Mutation};
use super::CacheInterface;
use async_trait::async_trait;
use hospeda_config::RedisConfig;
use hospeda_core::{HealthCheck, HealthStatus, HospedaResult};
use hospeda_resilience::with_timeout;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

struct Core {
    backend: Arc<dyn CacheInterface>,
    command_timeout: Duration,
    /// Pattern deletes take many round trips; each is bounded by the backend.
    invalidation_timeout: Duration,
    available: AtomicBool,
}

impl Core {
    /// Runs one backend command under the deadline; `None` on any failure.
    async fn run<T, Fut>(&self, operation: &str, key: &str, fut: Fut) -> Option<T>
    where
        Fut: Future<Output = HospedaResult<T>>,
    {
        self.run_within(self.command_timeout, operation, key, fut).await
    }

    async fn run_within<T, Fut>(
        &self,
        deadline: Duration,
        operation: &str,
        key: &str,
        fut: Fut,
    ) -> Option<T>
    where
        Fut: Future<Output = HospedaResult<T>>,
    {
        if !self.backend.is_enabled() {
            return None;
        }

        match with_timeout(deadline, operation, fut).await {
            Ok(value) => {
                if !self.available.swap(true, Ordering::SeqCst) {
                    info!("Cache backend available again");
                }
                Some(value)
            }
            Err(e) => {
                self.available.store(false, Ordering::SeqCst);
                warn!("Cache {} failed for '{}': {}", operation, key, e);
                None
            }
        }
    }

    async fn get(&self, key: &str) -> Option<String> {
        self.run("get", key, self.backend.get_raw(key)).await.flatten()
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> bool {
        self.run("set", key, self.backend.set_raw(key, value, ttl))
            .await
            .is_some()
    }

    async fn delete(&self, key: &str) -> bool {
        self.run("delete", key, self.backend.delete(key))
            .await
            .is_some()
    }

    async fn delete_by_pattern(&self, pattern: &str) -> bool {
        let delete = self.backend.delete_pattern(pattern);
        match self
            .run_within(self.invalidation_timeout, "delete_by_pattern", pattern, delete)
            .await
        {
            Some(count) => {
                debug!("Invalidated {} keys matching '{}'", count, pattern);
                true
            }
            None => false,
        }
    }
}

/// Read-through / write-around cache facade shared by all services.
///
/// Cheap to clone; clones share the backend, availability flag and the set
/// of background tasks.
#[derive(Clone)]
pub struct CacheGateway {
    core: Arc<Core>,
    tasks: Arc<Mutex<JoinSet<()>>>,
}

impl CacheGateway {
    /// Creates a gateway over a backend with a per-command deadline.
    ///
    /// The backend counts as available until a command fails; `connect`
    /// pings it first.
    #[must_use]
    pub fn new(backend: Arc<dyn CacheInterface>, command_timeout: Duration) -> Self {
        let available = backend.is_enabled();
        let invalidation_timeout = RedisConfig::default()
            .invalidation_timeout()
            .max(command_timeout);
        Self::build(backend, command_timeout, invalidation_timeout, available)
    }

    /// Creates a gateway and pings the backend once, so `is_available`
    /// reflects reachability from the start.
    pub async fn connect(backend: Arc<dyn CacheInterface>, config: &RedisConfig) -> Self {
        let gateway = Self::build(
            backend,
            config.command_timeout(),
            config.invalidation_timeout(),
            false,
        );
        let core = &gateway.core;
        if !core.backend.is_enabled() {
            return gateway;
        }

        match with_timeout(core.command_timeout, "ping", core.backend.ping()).await {
            Ok(()) => {
                core.available.store(true, Ordering::SeqCst);
                info!("Cache backend reachable");
            }
            Err(e) => warn!("Cache backend unreachable at startup, continuing without cache: {}", e),
        }
        gateway
    }

    fn build(
        backend: Arc<dyn CacheInterface>,
        command_timeout: Duration,
        invalidation_timeout: Duration,
        available: bool,
    ) -> Self {
        Self {
            core: Arc::new(Core {
                backend,
                command_timeout,
                invalidation_timeout,
                available: AtomicBool::new(available),
            }),
            tasks: Arc::new(Mutex::new(JoinSet::new())),
        }
    }

    /// Gets a raw value. Absent on miss or on any backend failure.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.core.get(key).await
    }

    /// Gets and decodes a JSON value. Undecodable entries count as misses.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding undecodable cache entry '{}': {}", key, e);
                None
            }
        }
    }

    /// Stores a JSON-encoded value. `false` on any failure.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: Duration) -> bool {
        match serde_json::to_string(value) {
            Ok(json) => self.core.set_raw(key, &json, ttl).await,
            Err(e) => {
                warn!("Failed to encode cache entry '{}': {}", key, e);
                false
            }
        }
    }

    /// Deletes a key. `false` on any failure.
    pub async fn delete(&self, key: &str) -> bool {
        self.core.delete(key).await
    }

    /// Deletes every key matching a glob pattern. `false` on any failure.
    pub async fn delete_by_pattern(&self, pattern: &str) -> bool {
        self.core.delete_by_pattern(pattern).await
    }

    /// Whether the last backend command succeeded.
    ///
    /// Purely informational: every other method is safe to call regardless.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.core.backend.is_enabled() && self.core.available.load(Ordering::SeqCst)
    }

    /// Returns the cached value for `key`, or loads it from `loader` and
    /// populates the cache in the background.
    ///
    /// Loader errors (including not-found) propagate unchanged and are never
    /// cached.
    pub async fn read_through<T, F, Fut>(&self, key: &str, ttl: Duration, loader: F) -> HospedaResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = HospedaResult<T>>,
    {
        if let Some(cached) = self.get_json::<T>(key).await {
            debug!("Cache hit for '{}'", key);
            return Ok(cached);
        }

        debug!("Cache miss for '{}'", key);
        let value = loader().await?;

        if self.core.backend.is_enabled() {
            match serde_json::to_string(&value) {
                Ok(json) => {
                    let core = Arc::clone(&self.core);
                    let key = key.to_string();
                    self.spawn(async move {
                        core.set_raw(&key, &json, ttl).await;
                    });
                }
                Err(e) => warn!("Failed to encode cache entry '{}': {}", key, e),
            }
        }

        Ok(value)
    }

    /// Clears every namespace made stale by `mutation` on `entity`, in the
    /// background.
    pub fn invalidate(&self, entity: EntityKind, mutation: Mutation) {
        let patterns = patterns_for(entity, mutation);
        debug!("Invalidating {:?} after {:?}: {:?}", entity, mutation, patterns);

        let core = Arc::clone(&self.core);
        self.spawn(async move {
            for pattern in patterns {
                core.delete_by_pattern(pattern).await;
            }
        });
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.tasks.lock();
        // Reap finished tasks so the set doesn't grow unbounded
        while tasks.try_join_next().is_some() {}
        tasks.spawn(task);
    }

    /// Waits for all background cache work spawned so far.
    pub async fn flush(&self) {
        loop {
            let mut pending = std::mem::take(&mut *self.tasks.lock());
            if pending.is_empty() {
                return;
            }
            while let Some(result) = pending.join_next().await {
                if let Err(e) = result {
                    warn!("Background cache task failed: {}", e);
                }
            }
        }
    }

    /// Number of background tasks not yet reaped.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.tasks.lock().len()
    }
}

impl std::fmt::Debug for CacheGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheGateway")
            .field("available", &self.is_available())
            .field("command_timeout", &self.core.command_timeout)
            .field("invalidation_timeout", &self.core.invalidation_timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl HealthCheck for CacheGateway {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        if !self.core.backend.is_enabled() {
            return HealthStatus::Degraded("cache disabled".to_string());
        }

        match self.core.run("ping", "-", self.core.backend.ping()).await {
            Some(()) => HealthStatus::Healthy,
            None => HealthStatus::Degraded("cache unavailable".to_string()),
        }
    }
}
