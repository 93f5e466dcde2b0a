//! JWT claims carried by Hospeda access and refresh tokens.

use chrono::{DateTime, Utc};
use hospeda_core::{UserId, UserRole};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload of every Hospeda token. Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// `uid` rendered as a string, per RFC 7519.
    pub sub: String,
    pub uid: i64,
    pub email: String,
    /// Role at issue time; a refresh re-reads it from the store.
    pub role: UserRole,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
    pub nbf: i64,
    pub iss: String,
    pub aud: String,
    /// Random per token, so two tokens issued in the same second differ.
    pub jti: String,
}

/// Identity and validity window used to build a set of claims.
#[derive(Debug, Clone)]
pub struct ClaimsSubject<'a> {
    pub user_id: UserId,
    pub email: &'a str,
    pub role: UserRole,
}

impl Claims {
    /// Builds claims of the given type for a subject.
    #[must_use]
    pub fn issue(
        subject: &ClaimsSubject<'_>,
        token_type: TokenType,
        issuer: &str,
        audience: &str,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.user_id.to_string(),
            uid: subject.user_id.into_inner(),
            email: subject.email.to_string(),
            role: subject.role,
            token_type,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::now_v7().to_string(),
        }
    }

    /// Returns the user id.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId(self.uid)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks if the token's role fulfils the required role.
    #[must_use]
    pub const fn has_role(&self, required: UserRole) -> bool {
        self.role.satisfies(required)
    }

    #[must_use]
    pub const fn is_access_token(&self) -> bool {
        matches!(self.token_type, TokenType::Access)
    }

    #[must_use]
    pub const fn is_refresh_token(&self) -> bool {
        matches!(self.token_type, TokenType::Refresh)
    }
}

/// Token type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived token sent with API requests.
    Access,
    /// Long-lived token exchanged for a new pair.
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}
