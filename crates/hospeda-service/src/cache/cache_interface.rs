//! Cache backend trait.

use async_trait::async_trait;
use hospeda_core::HospedaResult;
use std::time::Duration;

/// A key-value store with per-entry expiry.
///
/// Values are JSON strings so the trait stays dyn-compatible. Backends report
/// every failure as an error; absorbing them is the job of
/// [`CacheGateway`](super::CacheGateway).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Gets a raw value; `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> HospedaResult<Option<String>>;

    /// Sets a raw value with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> HospedaResult<()>;

    /// Deletes a key. Returns `true` if the key existed.
    async fn delete(&self, key: &str) -> HospedaResult<bool>;

    /// Deletes every key matching a glob pattern (`*`, `?`).
    ///
    /// Returns the number of keys deleted.
    async fn delete_pattern(&self, pattern: &str) -> HospedaResult<u64>;

    /// Round-trips the backend.
    async fn ping(&self) -> HospedaResult<()>;

    /// Whether the backend is configured at all.
    fn is_enabled(&self) -> bool;
}
