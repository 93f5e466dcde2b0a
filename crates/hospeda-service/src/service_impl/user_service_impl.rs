//! User service implementation.

use crate::cache::{cache_keys, CacheGateway, EntityKind, Mutation};
use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use hospeda_core::{
    AccountStatus, Email, HospedaError, HospedaResult, NewUser, UserId, ValidateExt,
};
use hospeda_repository::UserRepository;
use hospeda_security::{Claims, ClaimsExt, PasswordHasher};
use std::sync::Arc;
use tracing::{debug, info};

/// Cache-backed user service.
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<PasswordHasher>,
    cache: CacheGateway,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<PasswordHasher>,
        cache: CacheGateway,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            cache,
        }
    }

    fn parse_email(raw: &str) -> HospedaResult<Email> {
        Ok(Email::new(raw)?)
    }

    async fn ensure_email_free(&self, email: &Email) -> HospedaResult<()> {
        if self.user_repository.exists_by_email(email.as_str()).await? {
            return Err(HospedaError::Conflict(format!(
                "Email '{email}' is already registered"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn list_users(&self) -> HospedaResult<Vec<UserResponse>> {
        debug!("Listing users");

        self.cache
            .read_through(&cache_keys::all_users(), cache_keys::USER_TTL, || async {
                let users = self.user_repository.find_all().await?;
                Ok(users.into_iter().map(UserResponse::from).collect())
            })
            .await
    }

    async fn get_user(&self, caller: &Claims, id: UserId) -> HospedaResult<UserResponse> {
        debug!("Getting user: {}", id);
        caller.require_self_or_admin(id)?;

        self.cache
            .read_through(&cache_keys::user_by_id(id), cache_keys::USER_TTL, || async {
                self.user_repository
                    .find_by_id(id)
                    .await?
                    .map(UserResponse::from)
                    .ok_or_else(|| HospedaError::not_found("User", id))
            })
            .await
    }

    async fn create_user(&self, request: CreateUserRequest) -> HospedaResult<UserResponse> {
        debug!("Creating user: {}", request.email);
        request.validate_request()?;

        let email = Self::parse_email(&request.email)?;
        self.ensure_email_free(&email).await?;

        let password_hash = self.password_hasher.hash(&request.password)?;
        let user = self
            .user_repository
            .create(&NewUser {
                name: request.name,
                email,
                password_hash,
                role: request.role,
                status: request.status.unwrap_or(AccountStatus::Active),
            })
            .await?;

        self.cache.invalidate(EntityKind::User, Mutation::Create);

        info!("User created: {} ({})", user.id, user.role);
        Ok(UserResponse::from(user))
    }

    async fn update_user(
        &self,
        caller: &Claims,
        id: UserId,
        request: UpdateUserRequest,
    ) -> HospedaResult<UserResponse> {
        debug!("Updating user: {}", id);
        caller.require_self_or_admin(id)?;
        if request.changes_privileges() {
            caller.require_admin()?;
        }
        request.validate_request()?;

        let mut user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| HospedaError::not_found("User", id))?;

        if let Some(raw) = request.email.as_deref() {
            let email = Self::parse_email(raw)?;
            if email != user.email {
                self.ensure_email_free(&email).await?;
                user.email = email;
            }
        }
        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(password) = request.password.as_deref() {
            user.password_hash = self.password_hasher.hash(password)?;
        }
        let status_changed = request.status.is_some_and(|s| s != user.status);
        if let Some(role) = request.role {
            user.role = role;
        }
        if let Some(status) = request.status {
            user.status = status;
        }

        let updated = self.user_repository.update(&user).await?;

        let mutation = if status_changed {
            Mutation::StatusChange
        } else {
            Mutation::Update
        };
        self.cache.invalidate(EntityKind::User, mutation);

        info!("User updated: {}", id);
        Ok(UserResponse::from(updated))
    }

    async fn delete_user(&self, id: UserId) -> HospedaResult<()> {
        debug!("Deleting user: {}", id);

        if !self.user_repository.delete(id).await? {
            return Err(HospedaError::not_found("User", id));
        }

        self.cache.invalidate(EntityKind::User, Mutation::Delete);

        info!("User deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{claims, claims_for, fast_hasher, Harness};
    use hospeda_core::UserRole;

    fn service(h: &Harness) -> UserServiceImpl {
        UserServiceImpl::new(h.users.clone(), fast_hasher(), h.gateway.clone())
    }

    fn create_request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: "Sofía Pérez".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            role: UserRole::Owner,
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password_and_normalises_email() {
        let h = Harness::new();
        let service = service(&h);

        let created = service
            .create_user(create_request("Sofia@Example.com"))
            .await
            .unwrap();
        assert_eq!(created.email, "sofia@example.com");
        assert_eq!(created.status, AccountStatus::Active);

        let stored = h.users.find_by_id(created.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "secret123");
        assert!(fast_hasher().verify("secret123", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let h = Harness::new();
        let service = service(&h);
        service.create_user(create_request("dup@example.com")).await.unwrap();

        let err = service
            .create_user(create_request("DUP@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, HospedaError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_invalid_request_reports_fields() {
        let h = Harness::new();
        let mut request = create_request("not-an-email");
        request.name = "Al".to_string();

        let err = service(&h).create_user(request).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_get_user_is_served_from_cache_after_first_read() {
        let h = Harness::new();
        let service = service(&h);
        let user = h.user("ana@example.com", UserRole::Tenant).await;
        let caller = claims_for(&user);

        service.get_user(&caller, user.id).await.unwrap();
        h.gateway.flush().await;
        let reads = h.reads();

        let again = service.get_user(&caller, user.id).await.unwrap();
        assert_eq!(again.id, user.id);
        assert_eq!(h.reads(), reads);
    }

    #[tokio::test]
    async fn test_get_other_user_requires_admin() {
        let h = Harness::new();
        let service = service(&h);
        let user = h.user("ana@example.com", UserRole::Tenant).await;

        let err = service
            .get_user(&claims(UserId(999), UserRole::Owner), user.id)
            .await
            .unwrap_err();
        assert!(matches!(err, HospedaError::Forbidden(_)));

        assert!(service
            .get_user(&claims(UserId(999), UserRole::Admin), user.id)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found_and_not_cached() {
        let h = Harness::new();
        let service = service(&h);
        let admin = claims(UserId(1), UserRole::Admin);

        let err = service.get_user(&admin, UserId(42)).await.unwrap_err();
        assert!(err.is_not_found());
        h.gateway.flush().await;
        assert!(h.cache.is_empty());
    }

    #[tokio::test]
    async fn test_role_change_requires_admin() {
        let h = Harness::new();
        let service = service(&h);
        let user = h.user("ana@example.com", UserRole::Tenant).await;
        let request = UpdateUserRequest {
            role: Some(UserRole::Admin),
            ..Default::default()
        };

        let err = service
            .update_user(&claims_for(&user), user.id, request.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, HospedaError::Forbidden(_)));

        let updated = service
            .update_user(&claims(UserId(500), UserRole::Admin), user.id, request)
            .await
            .unwrap();
        assert_eq!(updated.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_update_rehashes_password_and_refreshes_cache() {
        let h = Harness::new();
        let service = service(&h);
        let user = h.user("ana@example.com", UserRole::Tenant).await;
        let caller = claims_for(&user);

        service.get_user(&caller, user.id).await.unwrap();
        h.gateway.flush().await;
        assert!(h.cache.keys().contains(&format!("user:{}", user.id)));

        service
            .update_user(
                &caller,
                user.id,
                UpdateUserRequest {
                    name: Some("Ana María".to_string()),
                    password: Some("nueva-clave".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        h.gateway.flush().await;

        assert!(h.cache.is_empty());
        let stored = h.users.find_by_id(user.id).await.unwrap().unwrap();
        assert!(fast_hasher().verify("nueva-clave", &stored.password_hash).unwrap());
        assert_eq!(service.get_user(&caller, user.id).await.unwrap().name, "Ana María");
    }

    #[tokio::test]
    async fn test_delete_user_clears_dependent_namespaces() {
        let h = Harness::new();
        let service = service(&h);
        let owner = h.user("owner@example.com", UserRole::Owner).await;
        for key in ["properties:owner:7", "bookings:all", "reviews:property:1", "user:3"] {
            h.gateway.set(key, &"cached", std::time::Duration::from_secs(60)).await;
        }

        service.delete_user(owner.id).await.unwrap();
        h.gateway.flush().await;

        assert!(h.gateway.get("properties:owner:7").await.is_none());
        assert!(h.cache.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_user_is_not_found() {
        let h = Harness::new();
        assert!(service(&h).delete_user(UserId(77)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_reads_survive_cache_outage() {
        let h = Harness::new();
        let service = service(&h);
        let user = h.user("ana@example.com", UserRole::Tenant).await;
        h.cache.set_available(false);

        let listed = service.list_users().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, user.id);
        h.gateway.flush().await;
        assert!(!h.gateway.is_available());
    }
}
