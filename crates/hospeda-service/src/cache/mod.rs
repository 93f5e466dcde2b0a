//! Caching infrastructure for the service layer.
//!
//! Backends implement [`CacheInterface`]; services only ever talk to the
//! [`CacheGateway`], which absorbs backend failures and owns background
//! populate/invalidate work.

mod cache_interface;
pub mod cache_keys;
mod gateway;
pub mod invalidation;
mod memory_cache;
mod redis_cache;

pub use cache_interface::CacheInterface;
pub use gateway::CacheGateway;
pub use invalidation::{EntityKind, Mutation};
pub use memory_cache::InMemoryCache;
pub use redis_cache::RedisCacheService;
