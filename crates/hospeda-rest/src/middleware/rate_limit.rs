//! Per-client rate limiting.

use crate::responses::error_response;
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header::RETRY_AFTER, HeaderMap, HeaderName, HeaderValue, Method, Request},
    middleware::Next,
    response::Response,
};
use hospeda_core::HospedaError;
use hospeda_resilience::{RateLimitStatus, RateLimiter, RateLimiters};
use std::net::SocketAddr;
use tracing::warn;

const AUTH_PATHS: [&str; 3] = ["/api/v1/auth/login", "/api/v1/auth/register", "/api/v1/auth/refresh"];
const CREATE_PATHS: [&str; 4] = [
    "/api/v1/users",
    "/api/v1/properties",
    "/api/v1/bookings",
    "/api/v1/reviews",
];

/// Applies the auth tier to credential endpoints or the create tier to
/// resource creation, then the general tier to every request.
///
/// Accepted responses carry the tightest remaining allowance in
/// `X-RateLimit-*` headers.
pub async fn rate_limit_middleware(
    State(limiters): State<RateLimiters>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let key = client_key(&request);
    let path = request.uri().path().trim_end_matches('/');

    let mut tiers: Vec<(&str, &RateLimiter)> = Vec::with_capacity(2);
    if AUTH_PATHS.contains(&path) {
        tiers.push(("auth", &limiters.auth));
    } else if request.method() == Method::POST && CREATE_PATHS.contains(&path) {
        tiers.push(("create", &limiters.create));
    }
    // Stricter tier first so its rejections leave the general allowance alone
    tiers.push(("general", &limiters.general));

    let mut tightest: Option<RateLimitStatus> = None;
    for (tier, limiter) in tiers {
        match limiter.check_with_retry_after(&key) {
            Ok(status) => {
                if tightest.map_or(true, |t| status.remaining < t.remaining) {
                    tightest = Some(status);
                }
            }
            Err(wait) => {
                warn!(client = %key, tier, path, "Rate limit exceeded");
                let mut response = error_response(&HospedaError::RateLimitExceeded);
                response
                    .headers_mut()
                    .insert(RETRY_AFTER, HeaderValue::from(wait.as_secs().max(1)));
                return response;
            }
        }
    }

    let mut response = next.run(request).await;
    if let Some(status) = tightest {
        insert_limit_headers(response.headers_mut(), status);
    }
    response
}

fn insert_limit_headers(headers: &mut HeaderMap, status: RateLimitStatus) {
    let reset = status.reset_after;
    let reset_secs = reset.as_secs() + u64::from(reset.subsec_nanos() > 0);
    headers.insert(
        HeaderName::from_static("x-ratelimit-limit"),
        HeaderValue::from(status.limit),
    );
    headers.insert(
        HeaderName::from_static("x-ratelimit-remaining"),
        HeaderValue::from(status.remaining),
    );
    headers.insert(
        HeaderName::from_static("x-ratelimit-reset"),
        HeaderValue::from(reset_secs),
    );
}

fn client_key(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_string(), |ConnectInfo(addr)| addr.ip().to_string())
}
