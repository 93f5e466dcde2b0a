//! Component wiring.
//!
//! Builds every long-lived component once at startup and hands out the
//! pieces the router needs. Components are shared through `Arc`s; services
//! only see repository and cache traits.

use hospeda_config::AppConfig;
use hospeda_core::{HealthCheck, HospedaResult};
use hospeda_repository::{
    create_pool, BookingRepository, DatabasePool, MySqlBookingRepository, MySqlPropertyRepository,
    MySqlReviewRepository, MySqlUserRepository, PropertyRepository, ReviewRepository,
    UserRepository,
};
use hospeda_resilience::RateLimiters;
use hospeda_rest::{middleware::AuthMiddlewareState, AppState};
use hospeda_security::{PasswordHasher, TokenProvider};
use hospeda_service::{
    AuthServiceImpl, BookingServiceImpl, CacheGateway, PropertyServiceImpl, RedisCacheService,
    ReviewServiceImpl, UserServiceImpl,
};
use std::sync::Arc;
use tracing::info;

/// Repositories behind their traits.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub properties: Arc<dyn PropertyRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl Repositories {
    /// MySQL-backed repositories sharing one pool.
    pub fn mysql(pool: &Arc<DatabasePool>) -> Self {
        Self {
            users: Arc::new(MySqlUserRepository::new(pool.clone())),
            properties: Arc::new(MySqlPropertyRepository::new(pool.clone())),
            bookings: Arc::new(MySqlBookingRepository::new(pool.clone())),
            reviews: Arc::new(MySqlReviewRepository::new(pool.clone())),
        }
    }
}

/// Everything the HTTP server needs, built from configuration.
pub struct Container {
    pub config: AppConfig,
    pub pool: Arc<DatabasePool>,
    pub redis: Arc<RedisCacheService>,
    pub cache: CacheGateway,
    pub token_provider: Arc<TokenProvider>,
    pub rate_limiters: Option<RateLimiters>,
    state: AppState,
}

impl Container {
    /// Connects to MySQL and Redis, then wires services.
    ///
    /// An unreachable Redis is not an error: the cache starts degraded.
    pub async fn build(config: AppConfig) -> HospedaResult<Self> {
        let pool = create_pool(&config.database).await?;
        if config.database.run_migrations {
            pool.run_migrations().await?;
        }

        let redis = Arc::new(RedisCacheService::connect(&config.redis).await?);
        let cache = CacheGateway::connect(redis.clone(), &config.redis).await;

        let security = Arc::new(config.security.clone());
        let token_provider = Arc::new(TokenProvider::new(security));
        let hasher = Arc::new(PasswordHasher::from_config(&config.security));

        let repos = Repositories::mysql(&pool);
        let health_checks: Vec<Arc<dyn HealthCheck>> =
            vec![pool.clone(), Arc::new(cache.clone())];
        let state = wire_services(&repos, hasher, token_provider.clone(), cache.clone())
            .with_health_checks(health_checks);

        let rate_limiters = RateLimiters::from_config(&config.rate_limit);

        info!("Components wired");
        Ok(Self {
            config,
            pool,
            redis,
            cache,
            token_provider,
            rate_limiters,
            state,
        })
    }

    /// State shared by the REST handlers.
    pub fn app_state(&self) -> AppState {
        self.state.clone()
    }

    pub fn auth_state(&self) -> AuthMiddlewareState {
        AuthMiddlewareState::new(self.token_provider.clone())
    }

    /// Waits for pending cache writes, then releases Redis and MySQL.
    pub async fn shutdown(&self) {
        info!("Flushing {} pending cache tasks", self.cache.pending_tasks());
        self.cache.flush().await;
        self.redis.close();
        self.pool.close().await;
    }
}

/// Builds the service layer over the given repositories and cache.
pub fn wire_services(
    repos: &Repositories,
    hasher: Arc<PasswordHasher>,
    token_provider: Arc<TokenProvider>,
    cache: CacheGateway,
) -> AppState {
    AppState::new(
        Arc::new(UserServiceImpl::new(
            repos.users.clone(),
            hasher.clone(),
            cache.clone(),
        )),
        Arc::new(PropertyServiceImpl::new(
            repos.properties.clone(),
            repos.users.clone(),
            cache.clone(),
        )),
        Arc::new(BookingServiceImpl::new(
            repos.bookings.clone(),
            repos.properties.clone(),
            repos.users.clone(),
            cache.clone(),
        )),
        Arc::new(ReviewServiceImpl::new(
            repos.reviews.clone(),
            repos.properties.clone(),
            repos.users.clone(),
            cache.clone(),
        )),
        Arc::new(AuthServiceImpl::new(
            repos.users.clone(),
            hasher,
            token_provider,
            cache,
        )),
    )
}
