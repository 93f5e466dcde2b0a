//! User-related DTOs.

use chrono::{DateTime, Utc};
use hospeda_core::rules::password_policy;
use hospeda_core::{AccountStatus, User, UserId, UserRole};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a user (admin only).
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Name must be 3-50 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(custom(function = "password_policy"))]
    pub password: String,

    pub role: UserRole,

    /// Defaults to `active`.
    pub status: Option<AccountStatus>,
}

/// Partial user update. Role and status changes are admin only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Name must be 3-50 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    /// Re-hashed before it is stored.
    #[validate(custom(function = "password_policy"))]
    pub password: Option<String>,

    pub role: Option<UserRole>,

    pub status: Option<AccountStatus>,
}

impl UpdateUserRequest {
    /// Whether this update touches privileged fields.
    #[must_use]
    pub const fn changes_privileges(&self) -> bool {
        self.role.is_some() || self.status.is_some()
    }
}

/// User response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: AccountStatus,
    pub registered_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email.into(),
            role: user.role,
            status: user.status,
            registered_at: user.registered_at,
        }
    }
}
