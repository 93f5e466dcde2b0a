//! Account email addresses.

use crate::error::HospedaError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use validator::ValidateEmail;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email address is required")]
    Empty,
    #[error("Invalid email address: {0}")]
    Malformed(String),
}

impl From<EmailError> for HospedaError {
    fn from(err: EmailError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Normalised (trimmed, lowercased) email address.
///
/// Account uniqueness is enforced on this form, so `Ana@Example.com` and
/// `ana@example.com` collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

fn normalise(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl Email {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailError> {
        let address = normalise(raw.as_ref());
        if address.is_empty() {
            return Err(EmailError::Empty);
        }
        if !address.validate_email() {
            return Err(EmailError::Malformed(address));
        }
        Ok(Self(address))
    }

    /// Wraps an address read back from the `users` table.
    #[must_use]
    pub fn from_trusted(raw: impl AsRef<str>) -> Self {
        Self(normalise(raw.as_ref()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalization() {
        let email: Email = "  Ana@Example.COM ".parse().unwrap();
        assert_eq!(email.as_str(), "ana@example.com");
        assert_eq!(email, Email::from_trusted("ana@example.com"));
    }

    #[test]
    fn test_invalid_email() {
        assert_eq!(Email::new("   "), Err(EmailError::Empty));
        assert!(matches!(Email::new("invalid"), Err(EmailError::Malformed(_))));
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("ana@").is_err());
    }

    #[test]
    fn test_email_error_is_a_validation_failure() {
        let err: HospedaError = EmailError::Empty.into();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_email_deserialization_validates() {
        assert!(serde_json::from_str::<Email>("\"ana@example.com\"").is_ok());
        assert!(serde_json::from_str::<Email>("\"nope\"").is_err());
    }
}
