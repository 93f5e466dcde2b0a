//! Error vocabulary shared by every Hospeda layer.
//!
//! Each variant maps to exactly one HTTP status and one stable error code,
//! so the REST boundary never has to inspect messages.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Hospeda.
///
/// Cache failures never leave the cache gateway, so [`HospedaError::Cache`]
/// only travels between a backend and the gateway.
#[derive(Error, Debug)]
pub enum HospedaError {
    /// A user, property, booking or review lookup came back empty.
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body failed declarative validation; one entry per field.
    #[error("Request validation failed")]
    InvalidFields(Vec<FieldError>),

    /// Duplicate email, second review, booking in a final state, broken reference.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Cache error: {0}")]
    Cache(String),

    /// A request exceeded the gateway deadline.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HospedaError {
    /// HTTP status paired with the machine-readable code.
    const fn kind(&self) -> (u16, &'static str) {
        match self {
            Self::NotFound { .. } => (404, "NOT_FOUND"),
            Self::Validation(_) | Self::InvalidFields(_) => (400, "VALIDATION_ERROR"),
            Self::Conflict(_) => (409, "CONFLICT"),
            Self::Unauthorized(_) => (401, "UNAUTHORIZED"),
            Self::InvalidToken(_) => (401, "INVALID_TOKEN"),
            Self::TokenExpired => (401, "TOKEN_EXPIRED"),
            Self::InvalidCredentials => (401, "INVALID_CREDENTIALS"),
            Self::Forbidden(_) => (403, "FORBIDDEN"),
            Self::RateLimitExceeded => (429, "RATE_LIMIT_EXCEEDED"),
            Self::Timeout(_) => (503, "TIMEOUT"),
            Self::Database(_) => (500, "DATABASE_ERROR"),
            Self::Configuration(_) => (500, "CONFIGURATION_ERROR"),
            Self::Cache(_) => (500, "CACHE_ERROR"),
            Self::Internal(_) | Self::Other(_) => (500, "INTERNAL_ERROR"),
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.kind().0
    }

    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        self.kind().1
    }

    /// `NotFound` for the named resource kind.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    #[must_use]
    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        Self::Forbidden(message.into())
    }

    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// True only for a genuinely absent record, never for a cache failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for 5xx errors, which the REST layer logs at error level.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.kind().0 >= 500
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for HospedaError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    // MySQL duplicate entry / SQLSTATE integrity violation
                    if code == "23000" || code == "1062" {
                        return Self::Conflict(db_err.message().to_string());
                    }
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for HospedaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// The `error` member of a failed response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    /// Present only for field validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// One rejected field, addressed by dotted path (`location.city`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    pub field: String,
    pub message: String,
    /// Validator rule that failed, e.g. `length` or `range`.
    pub code: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn from_error(error: &HospedaError) -> Self {
        let details = match error {
            HospedaError::InvalidFields(fields) => Some(fields.clone()),
            _ => None,
        };

        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
        }
    }

}

impl From<&HospedaError> for ErrorResponse {
    fn from(error: &HospedaError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(HospedaError::not_found("Property", 1).status_code(), 404);
        assert_eq!(HospedaError::validation("invalid email").status_code(), 400);
        assert_eq!(HospedaError::InvalidFields(vec![]).status_code(), 400);
        assert_eq!(HospedaError::unauthorized("not logged in").status_code(), 401);
        assert_eq!(HospedaError::forbidden("no permission").status_code(), 403);
        assert_eq!(HospedaError::conflict("duplicate").status_code(), 409);
        assert_eq!(HospedaError::RateLimitExceeded.status_code(), 429);
        assert_eq!(HospedaError::Database("db".to_string()).status_code(), 500);
        assert_eq!(HospedaError::Timeout("t".to_string()).status_code(), 503);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(HospedaError::not_found("User", 1).error_code(), "NOT_FOUND");
        assert_eq!(HospedaError::TokenExpired.error_code(), "TOKEN_EXPIRED");
        assert_eq!(HospedaError::InvalidCredentials.error_code(), "INVALID_CREDENTIALS");
        assert_eq!(HospedaError::internal("err").error_code(), "INTERNAL_ERROR");
        assert_eq!(HospedaError::Cache("down".to_string()).error_code(), "CACHE_ERROR");
    }

    #[test]
    fn test_not_found_is_distinct_from_cache_failure() {
        assert!(HospedaError::not_found("Booking", 9).is_not_found());
        assert!(!HospedaError::Cache("connection refused".to_string()).is_not_found());
    }

    #[test]
    fn test_server_errors() {
        assert!(HospedaError::Database("connection lost".to_string()).is_server_error());
        assert!(HospedaError::Timeout("request timed out".to_string()).is_server_error());
        assert!(!HospedaError::not_found("User", 1).is_server_error());
        assert!(!HospedaError::RateLimitExceeded.is_server_error());
    }

    #[test]
    fn test_not_found_message_names_resource() {
        let err = HospedaError::not_found("Review", "12");
        assert_eq!(err.to_string(), "Resource not found: Review with id 12");
    }

    #[test]
    fn test_error_response_from_error() {
        let err = HospedaError::not_found("User", 1);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(!response.message.is_empty());
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_carries_field_details() {
        let err = HospedaError::InvalidFields(vec![FieldError {
            field: "email".to_string(),
            message: "Invalid email".to_string(),
            code: "email".to_string(),
        }]);
        let response = ErrorResponse::from(&err);
        assert_eq!(response.code, "VALIDATION_ERROR");
        assert_eq!(response.details.map(|d| d.len()), Some(1));
    }
}
