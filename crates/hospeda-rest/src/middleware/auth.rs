//! Bearer token resolution.

use crate::extractors::TokenRejected;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use hospeda_security::TokenProvider;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub token_provider: Arc<TokenProvider>,
}

impl AuthMiddlewareState {
    pub fn new(token_provider: Arc<TokenProvider>) -> Self {
        Self { token_provider }
    }
}

/// Validates the bearer token, if any, and stores its claims in the request
/// extensions.
///
/// Requests are never rejected here: public routes ignore the claims and
/// protected handlers demand them through `AuthenticatedUser`.
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(&request) {
        match state.token_provider.validate_access_token(token) {
            Ok(claims) => {
                debug!("Authenticated user: {} ({})", claims.uid, claims.role);
                request.extensions_mut().insert(claims);
            }
            Err(e) => {
                debug!("Token validation failed: {}", e);
                request
                    .extensions_mut()
                    .insert(TokenRejected::from_error(&e));
            }
        }
    }

    next.run(request).await
}

/// The token of an `Authorization: Bearer <token>` header. Other schemes
/// and empty tokens count as no token at all.
fn bearer_token(request: &Request<Body>) -> Option<&str> {
    let value = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
