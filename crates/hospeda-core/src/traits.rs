//! Dependency checks reported by `/ready`.

use async_trait::async_trait;

/// Implemented by the MySQL pool and the cache gateway.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Key under `checks` in the readiness payload.
    fn name(&self) -> &str;

    async fn check(&self) -> HealthStatus;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    /// Serving, but without some capability (e.g. the cache is offline).
    Degraded(String),
    /// Requests that need this dependency will fail.
    Unhealthy(String),
}

impl HealthStatus {
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    #[must_use]
    pub const fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy(_))
    }

    /// Short label used in readiness payloads.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "up",
            Self::Degraded(_) => "degraded",
            Self::Unhealthy(_) => "down",
        }
    }
}
