//! User entity.

use super::super::value_objects::{AccountStatus, Email, UserRole};
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A marketplace account: administrator, property owner or tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Display name (3-50 characters).
    pub name: String,

    /// Unique, normalised email address.
    pub email: Email,

    /// Argon2 hash (never exposed via API).
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: UserRole,

    pub status: AccountStatus,

    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

impl User {
    /// Checks if the user can log in.
    #[must_use]
    pub const fn can_login(&self) -> bool {
        self.status.can_login()
    }

    /// Checks if the user is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Checks if the user fulfils the specified role.
    #[must_use]
    pub const fn has_role(&self, required_role: UserRole) -> bool {
        self.role.satisfies(required_role)
    }
}

/// Insert payload for a user; the store assigns `id` and `registered_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub role: UserRole,
    pub status: AccountStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole, status: AccountStatus) -> User {
        User {
            id: UserId(1),
            name: "Lucía".to_string(),
            email: Email::from_trusted("lucia@example.com"),
            password_hash: "hash".to_string(),
            role,
            status,
            registered_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let json = serde_json::to_value(user(UserRole::Tenant, AccountStatus::Active)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "tenant");
    }

    #[test]
    fn test_login_requires_active_account() {
        assert!(user(UserRole::Owner, AccountStatus::Active).can_login());
        assert!(!user(UserRole::Owner, AccountStatus::Suspended).can_login());
    }

    #[test]
    fn test_admin_has_every_role() {
        let admin = user(UserRole::Admin, AccountStatus::Active);
        assert!(admin.is_admin());
        assert!(admin.has_role(UserRole::Owner));
        assert!(admin.has_role(UserRole::Tenant));
    }
}
