//! User role value object.

use crate::HospedaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplace roles.
///
/// Roles are flat: an owner is not "more" than a tenant. The only ordering is
/// that an administrator satisfies every role requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Platform administrator.
    Admin,
    /// Lists and manages properties.
    Owner,
    /// Books properties and writes reviews.
    #[default]
    Tenant,
}

impl UserRole {
    /// Checks if this role fulfils the required role.
    #[must_use]
    pub const fn satisfies(&self, required: Self) -> bool {
        matches!(
            (self, required),
            (Self::Admin, _) | (Self::Owner, Self::Owner) | (Self::Tenant, Self::Tenant)
        )
    }

    /// Returns true for administrators.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns all available roles.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Admin, Self::Owner, Self::Tenant]
    }

    /// Stable storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Owner => "owner",
            Self::Tenant => "tenant",
        }
    }
}

impl FromStr for UserRole {
    type Err = HospedaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "owner" => Ok(Self::Owner),
            "tenant" => Ok(Self::Tenant),
            other => Err(HospedaError::validation(format!("Unknown role: {other}"))),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions guarded purely by role.
///
/// Ownership checks (editing *your* property) happen in the services; this
/// table only answers "may this role attempt the action at all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// List, create and delete user accounts.
    UserManage,
    /// Change roles or account status.
    UserManageRoles,
    /// Publish a property listing.
    PropertyCreate,
    /// Request a booking.
    BookingCreate,
    /// Write a review.
    ReviewCreate,
}

impl Permission {
    /// Returns the role required for this permission.
    #[must_use]
    pub const fn required_role(&self) -> UserRole {
        match self {
            Self::UserManage | Self::UserManageRoles => UserRole::Admin,
            Self::PropertyCreate => UserRole::Owner,
            Self::BookingCreate | Self::ReviewCreate => UserRole::Tenant,
        }
    }

    /// Checks if the given role has this permission.
    #[must_use]
    pub const fn is_allowed_for(&self, role: UserRole) -> bool {
        role.satisfies(self.required_role())
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserManage => write!(f, "user:manage"),
            Self::UserManageRoles => write!(f, "user:manage_roles"),
            Self::PropertyCreate => write!(f, "property:create"),
            Self::BookingCreate => write!(f, "booking:create"),
            Self::ReviewCreate => write!(f, "review:create"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_satisfies_everything() {
        for role in UserRole::all() {
            assert!(UserRole::Admin.satisfies(role));
        }
    }

    #[test]
    fn test_roles_are_flat() {
        assert!(!UserRole::Owner.satisfies(UserRole::Tenant));
        assert!(!UserRole::Tenant.satisfies(UserRole::Owner));
        assert!(!UserRole::Owner.satisfies(UserRole::Admin));
        assert!(UserRole::Owner.satisfies(UserRole::Owner));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Owner".parse::<UserRole>().unwrap(), UserRole::Owner);
        assert_eq!(" tenant ".parse::<UserRole>().unwrap(), UserRole::Tenant);
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_default_role_is_tenant() {
        assert_eq!(UserRole::default(), UserRole::Tenant);
    }

    #[test]
    fn test_permissions() {
        assert!(Permission::PropertyCreate.is_allowed_for(UserRole::Owner));
        assert!(!Permission::PropertyCreate.is_allowed_for(UserRole::Tenant));
        assert!(Permission::BookingCreate.is_allowed_for(UserRole::Admin));
        assert!(!Permission::UserManage.is_allowed_for(UserRole::Owner));
        assert_eq!(Permission::ReviewCreate.to_string(), "review:create");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&UserRole::Owner).unwrap(), "\"owner\"");
    }
}
