//! JWT token provider for creating and validating tokens.

use super::{Claims, ClaimsSubject, TokenType};
use chrono::{Duration, Utc};
use hospeda_config::SecurityConfig;
use hospeda_core::{HospedaError, HospedaResult};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, warn};

/// Token pair containing access and refresh tokens.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    /// Always "Bearer".
    pub token_type: String,
}

/// HS256 token provider.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Generates an access/refresh pair for a user.
    pub fn generate_tokens(&self, subject: &ClaimsSubject<'_>) -> HospedaResult<TokenPair> {
        let access_token = self.sign(subject, TokenType::Access)?;
        let refresh_token = self.sign(subject, TokenType::Refresh)?;

        debug!("Issued token pair for user {}", subject.user_id);
        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.config.jwt_access_expiration_secs,
            token_type: "Bearer".to_string(),
        })
    }

    fn sign(&self, subject: &ClaimsSubject<'_>, token_type: TokenType) -> HospedaResult<String> {
        let lifetime = match token_type {
            TokenType::Access => self.config.jwt_access_expiration_secs,
            TokenType::Refresh => self.config.jwt_refresh_expiration_secs,
        };
        let expires_at = Utc::now() + Duration::seconds(i64::try_from(lifetime).unwrap_or(i64::MAX / 1000));

        let claims = Claims::issue(
            subject,
            token_type,
            &self.config.jwt_issuer,
            &self.config.jwt_audience,
            expires_at,
        );

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| HospedaError::Internal(format!("Failed to generate {token_type} token: {e}")))
    }

    /// Validates a token and returns the claims.
    pub fn validate_token(&self, token: &str) -> HospedaResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                warn!("Token validation failed: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => HospedaError::TokenExpired,
                    ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                        HospedaError::InvalidToken("Invalid token signature".to_string())
                    }
                    ErrorKind::InvalidIssuer => {
                        HospedaError::InvalidToken("Invalid token issuer".to_string())
                    }
                    ErrorKind::InvalidAudience => {
                        HospedaError::InvalidToken("Invalid token audience".to_string())
                    }
                    _ => HospedaError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Validates a token and requires it to be an access token.
    pub fn validate_access_token(&self, token: &str) -> HospedaResult<Claims> {
        let claims = self.validate_token(token)?;

        if !claims.is_access_token() {
            return Err(HospedaError::InvalidToken("Expected access token".to_string()));
        }

        Ok(claims)
    }

    /// Validates a token and requires it to be a refresh token.
    pub fn validate_refresh_token(&self, token: &str) -> HospedaResult<Claims> {
        let claims = self.validate_token(token)?;

        if !claims.is_refresh_token() {
            return Err(HospedaError::InvalidToken("Expected refresh token".to_string()));
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospeda_core::{UserId, UserRole};

    fn test_config() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: "test-secret-key-for-testing-only".to_string(),
            jwt_access_expiration_secs: 3600,
            jwt_refresh_expiration_secs: 86400,
            jwt_issuer: "test-issuer".to_string(),
            jwt_audience: "test-audience".to_string(),
            ..Default::default()
        }
    }

    fn subject() -> ClaimsSubject<'static> {
        ClaimsSubject {
            user_id: UserId(42),
            email: "tenant@example.com",
            role: UserRole::Tenant,
        }
    }

    #[test]
    fn test_generate_and_validate_tokens() {
        let provider = TokenProvider::new(Arc::new(test_config()));
        let tokens = provider.generate_tokens(&subject()).unwrap();

        let claims = provider.validate_access_token(&tokens.access_token).unwrap();
        assert_eq!(claims.user_id(), UserId(42));
        assert_eq!(claims.email, "tenant@example.com");
        assert_eq!(claims.role, UserRole::Tenant);
        assert_eq!(tokens.expires_in, 3600);
        assert_eq!(tokens.token_type, "Bearer");

        let refresh_claims = provider.validate_refresh_token(&tokens.refresh_token).unwrap();
        assert!(refresh_claims.is_refresh_token());
    }

    #[test]
    fn test_token_type_is_enforced() {
        let provider = TokenProvider::new(Arc::new(test_config()));
        let tokens = provider.generate_tokens(&subject()).unwrap();

        assert!(matches!(
            provider.validate_access_token(&tokens.refresh_token),
            Err(HospedaError::InvalidToken(_))
        ));
        assert!(matches!(
            provider.validate_refresh_token(&tokens.access_token),
            Err(HospedaError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_invalid_token() {
        let provider = TokenProvider::new(Arc::new(test_config()));
        assert!(provider.validate_token("invalid-token").is_err());
    }

    #[test]
    fn test_rejects_other_secret() {
        let provider = TokenProvider::new(Arc::new(test_config()));
        let other = TokenProvider::new(Arc::new(SecurityConfig {
            jwt_secret: "another-secret".to_string(),
            ..test_config()
        }));
        let tokens = other.generate_tokens(&subject()).unwrap();

        assert!(matches!(
            provider.validate_access_token(&tokens.access_token),
            Err(HospedaError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_rejects_other_audience() {
        let provider = TokenProvider::new(Arc::new(test_config()));
        let other = TokenProvider::new(Arc::new(SecurityConfig {
            jwt_audience: "someone-else".to_string(),
            ..test_config()
        }));
        let tokens = other.generate_tokens(&subject()).unwrap();

        assert!(provider.validate_access_token(&tokens.access_token).is_err());
    }
}
