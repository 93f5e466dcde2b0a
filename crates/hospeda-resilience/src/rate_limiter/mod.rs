//! Per-client rate limiting.

use governor::{
    clock::{Clock, DefaultClock},
    middleware::StateInformationMiddleware,
    DefaultKeyedRateLimiter, Quota, RateLimiter as GovernorRateLimiter,
};
use hospeda_config::{RateLimitConfig, RateLimitTier};
use hospeda_core::HospedaError;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

type KeyedLimiter = DefaultKeyedRateLimiter<String, StateInformationMiddleware>;

/// Allowance left for a key after an accepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    /// Time until the full allowance is available again.
    pub reset_after: Duration,
}

/// Keyed rate limiter allowing `max_requests` per window for each key.
///
/// The full allowance is available as a burst and replenishes evenly across
/// the window.
pub struct RateLimiter {
    limiter: Arc<KeyedLimiter>,
    clock: DefaultClock,
    tier: RateLimitTier,
    limit: u32,
    /// Time to regain a single request.
    replenish: Duration,
}

impl RateLimiter {
    /// Creates a limiter from a configured tier.
    #[must_use]
    pub fn from_tier(tier: &RateLimitTier) -> Self {
        let burst = NonZeroU32::new(tier.max_requests).unwrap_or(NonZeroU32::MIN);
        let period = tier.window() / burst.get();
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: Arc::new(
                GovernorRateLimiter::keyed(quota).with_middleware::<StateInformationMiddleware>(),
            ),
            clock: DefaultClock::default(),
            tier: *tier,
            limit: burst.get(),
            replenish: quota.replenish_interval(),
        }
    }

    /// Records a request for `key`, failing once the allowance is spent.
    pub fn check(&self, key: &str) -> Result<RateLimitStatus, HospedaError> {
        self.check_with_retry_after(key).map_err(|retry_after| {
            debug!(
                "Rate limit hit for {} ({} per {}s), retry after {:?}",
                key, self.tier.max_requests, self.tier.window_secs, retry_after
            );
            HospedaError::RateLimitExceeded
        })
    }

    /// Records a request for `key`; on rejection returns the time until the
    /// next request would be accepted.
    pub fn check_with_retry_after(&self, key: &str) -> Result<RateLimitStatus, Duration> {
        match self.limiter.check_key(&key.to_string()) {
            Ok(snapshot) => {
                let remaining = snapshot.remaining_burst_capacity().min(self.limit);
                Ok(RateLimitStatus {
                    limit: self.limit,
                    remaining,
                    reset_after: self.replenish.saturating_mul(self.limit - remaining),
                })
            }
            Err(not_until) => Err(not_until.wait_time_from(self.clock.now())),
        }
    }

    /// Drops state for keys whose allowance is fully replenished.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of keys currently tracked.
    #[must_use]
    pub fn tracked_keys(&self) -> usize {
        self.limiter.len()
    }

    #[must_use]
    pub const fn tier(&self) -> &RateLimitTier {
        &self.tier
    }
}

impl Clone for RateLimiter {
    fn clone(&self) -> Self {
        Self {
            limiter: Arc::clone(&self.limiter),
            clock: self.clock.clone(),
            tier: self.tier,
            limit: self.limit,
            replenish: self.replenish,
        }
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("tier", &self.tier)
            .finish_non_exhaustive()
    }
}

/// The three limiter tiers applied at the HTTP edge.
#[derive(Debug, Clone)]
pub struct RateLimiters {
    pub general: RateLimiter,
    pub auth: RateLimiter,
    pub create: RateLimiter,
}

impl RateLimiters {
    /// Builds all tiers, or `None` when rate limiting is disabled.
    #[must_use]
    pub fn from_config(config: &RateLimitConfig) -> Option<Self> {
        config.enabled.then(|| Self {
            general: RateLimiter::from_tier(&config.general),
            auth: RateLimiter::from_tier(&config.auth),
            create: RateLimiter::from_tier(&config.create),
        })
    }
}
