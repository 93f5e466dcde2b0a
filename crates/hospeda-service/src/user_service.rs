//! User service trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use hospeda_core::{HospedaResult, UserId};
use hospeda_security::Claims;

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Lists all users, newest first.
    async fn list_users(&self) -> HospedaResult<Vec<UserResponse>>;

    /// Gets a user by ID. Callers may only read themselves unless admin.
    async fn get_user(&self, caller: &Claims, id: UserId) -> HospedaResult<UserResponse>;

    /// Creates a user with an explicit role.
    async fn create_user(&self, request: CreateUserRequest) -> HospedaResult<UserResponse>;

    /// Updates a user; role and status changes require an admin caller.
    async fn update_user(
        &self,
        caller: &Claims,
        id: UserId,
        request: UpdateUserRequest,
    ) -> HospedaResult<UserResponse>;

    /// Deletes a user together with everything they own.
    async fn delete_user(&self, id: UserId) -> HospedaResult<()>;
}
