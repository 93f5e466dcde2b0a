//! User management controller.

use super::parse_id;
use crate::{
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{created, no_content, ok, ApiResult, AppError, Created},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use hospeda_core::{ErrorResponse, Permission, UserId};
use hospeda_security::ClaimsExt;
use hospeda_service::{CreateUserRequest, PropertyResponse, UpdateUserRequest, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/properties", get(list_user_properties))
}

/// List all users (admin only).
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 403, description = "Admin only", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<UserResponse>> {
    debug!("List users request");

    user.require_permission(Permission::UserManage)?;

    let response = state.user_service.list_users().await?;
    ok(response)
}

/// Create a user with any role (admin only).
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid user data", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<Created<UserResponse>, AppError> {
    debug!("Create user request: {}", request.email);

    user.require_permission(Permission::UserManage)?;

    let response = state.user_service.create_user(request).await?;
    Ok(created(response))
}

/// Get a user by ID (self or admin).
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", id);

    let user_id: UserId = parse_id(&id, "user")?;
    let response = state.user_service.get_user(&user, user_id).await?;
    ok(response)
}

/// Update a user (self or admin; role and status changes admin only).
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 403, description = "Not allowed", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update user request: {}", id);

    let user_id: UserId = parse_id(&id, "user")?;
    let response = state.user_service.update_user(&user, user_id, request).await?;
    ok(response)
}

/// Delete a user and everything they own (admin only).
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    user.require_permission(Permission::UserManage)?;

    let user_id: UserId = parse_id(&id, "user")?;
    state.user_service.delete_user(user_id).await?;

    Ok(no_content())
}

/// List the properties a user owns.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/properties",
    tag = "users",
    params(("id" = i64, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Properties of the owner", body = [PropertyResponse]),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn list_user_properties(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<PropertyResponse>> {
    debug!("List properties of user: {}", id);

    let owner_id: UserId = parse_id(&id, "user")?;
    let response = state.property_service.list_by_owner(owner_id).await?;
    ok(response)
}
