//! Request deadline middleware.

use crate::responses::error_response;
use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use hospeda_resilience::with_timeout;
use std::time::Duration;
use tracing::warn;

/// Answers 503 when the handler does not finish within the deadline.
pub async fn timeout_middleware(
    State(deadline): State<Duration>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let label = format!("{} {}", request.method(), request.uri().path());

    match with_timeout(deadline, &label, async { Ok(next.run(request).await) }).await {
        Ok(response) => response,
        Err(err) => {
            warn!("{}", err);
            error_response(&err)
        }
    }
}
