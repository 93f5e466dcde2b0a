//! One access-log line per request.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

const REQUEST_ID: &str = "x-request-id";

/// Emits on target `http` after the handler answers. 5xx responses log at
/// warn; the handler's own error line carries the cause.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get(REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();
    if status.is_server_error() {
        warn!(target: "http", %method, %uri, status = status.as_u16(), elapsed_ms, %request_id, "request failed");
    } else {
        info!(target: "http", %method, %uri, status = status.as_u16(), elapsed_ms, %request_id, "request served");
    }

    response
}
