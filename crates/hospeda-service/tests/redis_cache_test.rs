//! Integration tests for the Redis cache backend.
//!
//! Most run against a real Redis server using testcontainers and are
//! ignored by default. Run with `cargo test -- --ignored` when Docker is up.

use hospeda_config::RedisConfig;
use hospeda_service::{CacheGateway, CacheInterface, EntityKind, Mutation, RedisCacheService};
use std::sync::Arc;
use std::time::Duration;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::Redis;

struct TestRedis {
    _container: ContainerAsync<Redis>,
    config: RedisConfig,
    cache: Arc<RedisCacheService>,
}

impl TestRedis {
    async fn new() -> Self {
        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");
        let port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port");

        let config = RedisConfig {
            url: format!("redis://127.0.0.1:{port}"),
            pool_size: 4,
            enabled: true,
            command_timeout_ms: 1000,
            invalidation_timeout_ms: 10_000,
        };
        let cache = RedisCacheService::connect(&config)
            .await
            .expect("Failed to build Redis pool");

        Self {
            _container: container,
            config,
            cache: Arc::new(cache),
        }
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_set_get_and_expire() {
    let redis = TestRedis::new().await;
    let cache = &redis.cache;

    cache
        .set_raw("property:42", r#"{"id":42,"title":"Loft"}"#, Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(
        cache.get_raw("property:42").await.unwrap().as_deref(),
        Some(r#"{"id":42,"title":"Loft"}"#)
    );

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(cache.get_raw("property:42").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pattern_delete_spans_scan_batches() {
    let redis = TestRedis::new().await;
    let cache = &redis.cache;
    let ttl = Duration::from_secs(60);

    for id in 0..250 {
        cache.set_raw(&format!("property:{id}"), "{}", ttl).await.unwrap();
    }
    cache.set_raw("user:3", "{}", ttl).await.unwrap();

    assert_eq!(cache.delete_pattern("property:*").await.unwrap(), 250);
    assert_eq!(cache.get_raw("user:3").await.unwrap().as_deref(), Some("{}"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_user_delete_fan_out_through_gateway() {
    let redis = TestRedis::new().await;
    let gateway = CacheGateway::connect(redis.cache.clone(), &redis.config).await;
    assert!(gateway.is_available());
    let ttl = Duration::from_secs(60);

    for key in ["users:all", "user:7", "properties:owner:7", "bookings:tenant:7", "reviews:tenant:7"] {
        assert!(gateway.set(key, &"cached", ttl).await);
    }

    gateway.invalidate(EntityKind::User, Mutation::Delete);
    gateway.flush().await;

    assert!(gateway.get("properties:owner:7").await.is_none());
    assert!(gateway.get("users:all").await.is_none());
    assert!(gateway.is_available());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_closed_pool_degrades_to_miss() {
    let redis = TestRedis::new().await;
    let gateway = CacheGateway::new(redis.cache.clone(), Duration::from_secs(1));
    assert!(gateway.set("booking:1", &1, Duration::from_secs(60)).await);

    redis.cache.close();

    assert!(gateway.get("booking:1").await.is_none());
    assert!(!gateway.set("booking:1", &1, Duration::from_secs(60)).await);
}

#[tokio::test]
async fn test_unreachable_server_starts_unavailable() {
    let config = RedisConfig {
        url: "redis://127.0.0.1:1".to_string(),
        command_timeout_ms: 200,
        ..RedisConfig::default()
    };
    let cache = RedisCacheService::connect(&config).await.unwrap();
    let gateway = CacheGateway::connect(Arc::new(cache), &config).await;

    assert!(!gateway.is_available());
    assert!(gateway.get("user:1").await.is_none());
}
