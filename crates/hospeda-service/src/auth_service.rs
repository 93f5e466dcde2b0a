//! Authentication service implementation.

use crate::cache::{CacheGateway, EntityKind, Mutation};
use crate::dto::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, UserResponse};
use async_trait::async_trait;
use hospeda_core::{
    AccountStatus, Email, HospedaError, HospedaResult, NewUser, User, UserRole, ValidateExt,
};
use hospeda_repository::UserRepository;
use hospeda_security::{Claims, ClaimsSubject, PasswordHasher, TokenProvider};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Registers a new owner or tenant and signs them in.
    async fn register(&self, request: RegisterRequest) -> HospedaResult<AuthResponse>;

    /// Logs in a user.
    async fn login(&self, request: LoginRequest) -> HospedaResult<AuthResponse>;

    /// Exchanges a refresh token for a new pair.
    async fn refresh_token(&self, request: RefreshTokenRequest) -> HospedaResult<AuthResponse>;

    /// Validates an access token and returns claims.
    fn validate_token(&self, token: &str) -> HospedaResult<Claims>;

    /// Gets the current user from claims.
    async fn current_user(&self, claims: &Claims) -> HospedaResult<UserResponse>;
}

/// Authentication service implementation.
pub struct AuthServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<PasswordHasher>,
    token_provider: Arc<TokenProvider>,
    cache: CacheGateway,
}

impl AuthServiceImpl {
    /// Creates a new authentication service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<PasswordHasher>,
        token_provider: Arc<TokenProvider>,
        cache: CacheGateway,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_provider,
            cache,
        }
    }

    fn create_auth_response(&self, user: User) -> HospedaResult<AuthResponse> {
        let tokens = self.token_provider.generate_tokens(&ClaimsSubject {
            user_id: user.id,
            email: user.email.as_str(),
            role: user.role,
        })?;

        Ok(AuthResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
            user: UserResponse::from(user),
        })
    }

    fn ensure_can_login(user: &User) -> HospedaResult<()> {
        if user.can_login() {
            return Ok(());
        }
        warn!("Login refused: user {} is {}", user.id, user.status);
        Err(match user.status {
            AccountStatus::Suspended => HospedaError::forbidden("Account is suspended"),
            _ => HospedaError::forbidden("Account is not active"),
        })
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(&self, request: RegisterRequest) -> HospedaResult<AuthResponse> {
        debug!("Registering user: {}", request.email);
        request.validate_request()?;

        let email = Email::new(&request.email)?;
        if self.user_repository.exists_by_email(email.as_str()).await? {
            return Err(HospedaError::Conflict(format!(
                "Email '{email}' is already registered"
            )));
        }

        let password_hash = self.password_hasher.hash(&request.password)?;
        let user = self
            .user_repository
            .create(&NewUser {
                name: request.name,
                email,
                password_hash,
                role: request.role.unwrap_or(UserRole::Tenant),
                status: AccountStatus::Active,
            })
            .await?;

        self.cache.invalidate(EntityKind::User, Mutation::Create);

        info!("User registered: {} ({})", user.id, user.role);
        self.create_auth_response(user)
    }

    async fn login(&self, request: LoginRequest) -> HospedaResult<AuthResponse> {
        debug!("Login attempt for: {}", request.email);
        request.validate_request()?;

        let user = self
            .user_repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email {}", request.email);
                HospedaError::InvalidCredentials
            })?;

        if !self.password_hasher.verify(&request.password, &user.password_hash)? {
            warn!("Login failed: invalid password for user {}", user.id);
            return Err(HospedaError::InvalidCredentials);
        }

        Self::ensure_can_login(&user)?;

        info!("User logged in: {}", user.id);
        self.create_auth_response(user)
    }

    async fn refresh_token(&self, request: RefreshTokenRequest) -> HospedaResult<AuthResponse> {
        debug!("Refreshing token");
        request.validate_request()?;

        let claims = self
            .token_provider
            .validate_refresh_token(&request.refresh_token)?;

        // Role or status may have changed since the token was issued
        let user = self
            .user_repository
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| HospedaError::InvalidToken("User no longer exists".to_string()))?;
        Self::ensure_can_login(&user)?;

        info!("Token refreshed for user: {}", user.id);
        self.create_auth_response(user)
    }

    fn validate_token(&self, token: &str) -> HospedaResult<Claims> {
        self.token_provider.validate_access_token(token)
    }

    async fn current_user(&self, claims: &Claims) -> HospedaResult<UserResponse> {
        let user_id = claims.user_id();
        self.user_repository
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| HospedaError::not_found("User", user_id))
    }
}

impl std::fmt::Debug for AuthServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fast_hasher, Harness};
    use hospeda_config::SecurityConfig;

    fn service(h: &Harness) -> AuthServiceImpl {
        let config = SecurityConfig {
            jwt_secret: "test-secret-at-least-32-bytes-long!!".to_string(),
            ..Default::default()
        };
        AuthServiceImpl::new(
            h.users.clone(),
            fast_hasher(),
            Arc::new(TokenProvider::new(Arc::new(config))),
            h.gateway.clone(),
        )
    }

    fn register_request(role: Option<UserRole>) -> RegisterRequest {
        RegisterRequest {
            name: "Valentina".to_string(),
            email: "valentina@example.com".to_string(),
            password: "clave-segura".to_string(),
            role,
        }
    }

    fn login_request(password: &str) -> LoginRequest {
        LoginRequest {
            email: "valentina@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_defaults_to_tenant_and_issues_tokens() {
        let h = Harness::new();
        let service = service(&h);

        let response = service.register(register_request(None)).await.unwrap();
        assert_eq!(response.user.role, UserRole::Tenant);
        assert_eq!(response.token_type, "Bearer");

        let claims = service.validate_token(&response.access_token).unwrap();
        assert_eq!(claims.user_id(), response.user.id);
    }

    #[tokio::test]
    async fn test_register_as_admin_is_rejected() {
        let h = Harness::new();
        let err = service(&h)
            .register(register_request(Some(UserRole::Admin)))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_register_twice_is_conflict() {
        let h = Harness::new();
        let service = service(&h);
        service.register(register_request(None)).await.unwrap();

        let err = service.register(register_request(None)).await.unwrap_err();
        assert!(matches!(err, HospedaError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_login() {
        let h = Harness::new();
        let service = service(&h);
        service
            .register(register_request(Some(UserRole::Owner)))
            .await
            .unwrap();

        let response = service.login(login_request("clave-segura")).await.unwrap();
        assert_eq!(response.user.role, UserRole::Owner);

        let err = service.login(login_request("otra-clave")).await.unwrap_err();
        assert!(matches!(err, HospedaError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_suspended_user_cannot_log_in() {
        let h = Harness::new();
        let service = service(&h);
        let registered = service.register(register_request(None)).await.unwrap();

        let mut user = h.users.find_by_id(registered.user.id).await.unwrap().unwrap();
        user.status = AccountStatus::Suspended;
        h.users.update(&user).await.unwrap();

        let err = service.login(login_request("clave-segura")).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        let err = service
            .refresh_token(RefreshTokenRequest {
                refresh_token: registered.refresh_token,
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_tokens() {
        let h = Harness::new();
        let service = service(&h);
        let registered = service.register(register_request(None)).await.unwrap();

        let refreshed = service
            .refresh_token(RefreshTokenRequest {
                refresh_token: registered.refresh_token.clone(),
            })
            .await
            .unwrap();
        assert_eq!(refreshed.user.id, registered.user.id);

        let err = service
            .refresh_token(RefreshTokenRequest {
                refresh_token: registered.access_token,
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_current_user() {
        let h = Harness::new();
        let service = service(&h);
        let registered = service.register(register_request(None)).await.unwrap();
        let claims = service.validate_token(&registered.access_token).unwrap();

        let me = service.current_user(&claims).await.unwrap();
        assert_eq!(me.email, "valentina@example.com");
    }
}
