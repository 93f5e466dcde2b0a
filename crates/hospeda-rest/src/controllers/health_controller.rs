//! `/health`, `/ready` and `/live`. None of them require a token.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use futures::future::join_all;
use hospeda_core::HealthStatus;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Readiness report: overall status plus one entry per dependency.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    /// `ready`, `degraded` or `not_ready`.
    pub status: String,
    /// Dependency name to `up`, `degraded` or `down`.
    pub checks: BTreeMap<String, String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

/// Process is up; does not touch MySQL or Redis.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Checks every registered dependency concurrently. Only a `down`
/// dependency answers 503; a degraded cache still answers 200.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready, possibly degraded", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let checks = state.health_checks.iter().map(|dependency| async move {
        (dependency.name().to_string(), dependency.check().await)
    });
    let results: Vec<(String, HealthStatus)> = join_all(checks).await;

    let (code, overall) = summarize(results.iter().map(|(_, status)| status));
    let checks = results
        .iter()
        .map(|(name, status)| (name.clone(), status.label().to_string()))
        .collect();

    (
        code,
        Json(ReadinessResponse {
            status: overall.to_string(),
            checks,
        }),
    )
}

fn summarize<'a, I>(mut statuses: I) -> (StatusCode, &'static str)
where
    I: Iterator<Item = &'a HealthStatus> + Clone,
{
    if statuses.clone().any(HealthStatus::is_unhealthy) {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    } else if statuses.all(HealthStatus::is_healthy) {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::OK, "degraded")
    }
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive")
    )
)]
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize() {
        let up = HealthStatus::Healthy;
        let slow = HealthStatus::Degraded("cache unavailable".to_string());
        let down = HealthStatus::Unhealthy("refused".to_string());

        assert_eq!(summarize([&up, &up].into_iter()), (StatusCode::OK, "ready"));
        assert_eq!(summarize([&up, &slow].into_iter()), (StatusCode::OK, "degraded"));
        assert_eq!(
            summarize([&slow, &down].into_iter()),
            (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
        );
    }
}
