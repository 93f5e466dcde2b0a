//! Role and ownership checks over token claims.

use crate::Claims;
use hospeda_core::{HospedaError, HospedaResult, Permission, UserId, UserRole};

/// Extension trait for Claims to check permissions.
pub trait ClaimsExt {
    /// Requires a specific role (admins satisfy every role).
    fn require_role(&self, role: UserRole) -> HospedaResult<()>;

    /// Requires a specific permission.
    fn require_permission(&self, permission: Permission) -> HospedaResult<()>;

    /// Checks if the token belongs to the given user.
    fn is_self(&self, user_id: UserId) -> bool;

    /// Requires the caller to be `user_id` or an admin.
    fn require_self_or_admin(&self, user_id: UserId) -> HospedaResult<()>;

    /// Requires the caller to own the resource or be an admin.
    fn require_owner_or_admin(&self, resource_owner_id: UserId, resource: &str) -> HospedaResult<()>;

    /// Requires the admin role.
    fn require_admin(&self) -> HospedaResult<()>;
}

impl ClaimsExt for Claims {
    fn require_role(&self, role: UserRole) -> HospedaResult<()> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(HospedaError::Forbidden(format!(
                "Required role: {role}, your role: {}",
                self.role
            )))
        }
    }

    fn require_permission(&self, permission: Permission) -> HospedaResult<()> {
        if permission.is_allowed_for(self.role) {
            Ok(())
        } else {
            Err(HospedaError::Forbidden(format!(
                "Permission denied: {permission} requires the {} role",
                permission.required_role()
            )))
        }
    }

    fn is_self(&self, user_id: UserId) -> bool {
        self.user_id() == user_id
    }

    fn require_self_or_admin(&self, user_id: UserId) -> HospedaResult<()> {
        if self.is_self(user_id) || self.role.is_admin() {
            Ok(())
        } else {
            Err(HospedaError::forbidden("You can only access your own account"))
        }
    }

    fn require_owner_or_admin(&self, resource_owner_id: UserId, resource: &str) -> HospedaResult<()> {
        if self.is_self(resource_owner_id) || self.role.is_admin() {
            Ok(())
        } else {
            Err(HospedaError::Forbidden(format!(
                "You don't have permission to modify this {resource}"
            )))
        }
    }

    fn require_admin(&self) -> HospedaResult<()> {
        self.require_role(UserRole::Admin)
    }
}
