//! Authentication-related DTOs.

use super::UserResponse;
use hospeda_core::rules::password_policy;
use hospeda_core::UserRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Self-service registration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Name must be 3-50 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(custom(function = "password_policy"))]
    pub password: String,

    /// `owner` or `tenant`; defaults to `tenant`.
    #[validate(custom(function = "self_service_role"))]
    pub role: Option<UserRole>,
}

fn self_service_role(role: &UserRole) -> Result<(), ValidationError> {
    if role.is_admin() {
        let mut err = ValidationError::new("role");
        err.message = Some("Administrators cannot self-register".into());
        return Err(err);
    }
    Ok(())
}

/// Token refresh request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Authentication response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(role: Option<UserRole>) -> RegisterRequest {
        RegisterRequest {
            name: "Martín".to_string(),
            email: "martin@example.com".to_string(),
            password: "hunter22".to_string(),
            role,
        }
    }

    #[test]
    fn test_register_roles() {
        assert!(register(None).validate().is_ok());
        assert!(register(Some(UserRole::Owner)).validate().is_ok());
        assert!(register(Some(UserRole::Tenant)).validate().is_ok());
        assert!(register(Some(UserRole::Admin)).validate().is_err());
    }

    #[test]
    fn test_login_request_requires_password() {
        let request = LoginRequest {
            email: "martin@example.com".to_string(),
            password: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_refresh_request_requires_token() {
        let request = RefreshTokenRequest {
            refresh_token: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
