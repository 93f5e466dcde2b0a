//! JWT claims extractor.

use crate::responses::error_response;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use hospeda_core::HospedaError;
use hospeda_security::Claims;

/// Extractor for authenticated user claims.
///
/// The auth middleware validates the bearer token and stores the claims in
/// the request extensions; this extractor turns their absence into a 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Error type for authentication extraction.
#[derive(Debug)]
pub struct AuthError(HospedaError);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        error_response(&self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(AuthenticatedUser(claims.clone()));
        }

        let err = match parts.extensions.get::<TokenRejected>() {
            Some(rejected) => rejected.to_error(),
            None => HospedaError::unauthorized("Authentication required"),
        };
        Err(AuthError(err))
    }
}

/// Why a presented bearer token was not accepted.
///
/// Stored by the auth middleware so handlers report expired and malformed
/// tokens distinctly from a missing header.
#[derive(Debug, Clone)]
pub struct TokenRejected {
    pub expired: bool,
    pub reason: String,
}

impl TokenRejected {
    /// Records a validation failure from the token provider.
    pub fn from_error(err: &HospedaError) -> Self {
        let reason = match err {
            HospedaError::InvalidToken(reason) => reason.clone(),
            other => other.to_string(),
        };
        Self {
            expired: matches!(err, HospedaError::TokenExpired),
            reason,
        }
    }

    fn to_error(&self) -> HospedaError {
        if self.expired {
            HospedaError::TokenExpired
        } else {
            HospedaError::InvalidToken(self.reason.clone())
        }
    }
}
