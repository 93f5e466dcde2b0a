//! Review controller.

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
use hospeda_core::{ErrorResponse, Permission, PropertyId, ReviewId, UserId};
use hospeda_security::ClaimsExt;
use hospeda_service::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};
use tracing::debug;

/// Creates the review router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route("/property/:property_id", get(list_by_property))
        .route("/tenant/:tenant_id", get(list_by_tenant))
        .route(
            "/:id",
            get(get_review).put(update_review).delete(delete_review),
        )
}

/// List every review.
#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    tag = "reviews",
    responses((status = 200, description = "All reviews, newest first", body = [ReviewResponse]))
)]
pub async fn list_reviews(State(state): State<AppState>) -> ApiResult<Vec<ReviewResponse>> {
    debug!("List reviews request");

    ok(state.review_service.list_reviews().await?)
}

/// Get a review by ID.
#[utoipa::path(
    get,
    path = "/api/v1/reviews/{id}",
    tag = "reviews",
    params(("id" = i64, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review found", body = ReviewResponse),
        (status = 404, description = "Review not found", body = ErrorResponse)
    )
)]
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ReviewResponse> {
    let id: ReviewId = parse_id(&id, "review")?;
    debug!("Get review request: {}", id);

    ok(state.review_service.get_review(id).await?)
}

/// List the reviews of a property.
#[utoipa::path(
    get,
    path = "/api/v1/reviews/property/{property_id}",
    tag = "reviews",
    params(("property_id" = i64, Path, description = "Property id")),
    responses(
        (status = 200, description = "Reviews of the property", body = [ReviewResponse]),
        (status = 404, description = "Property not found", body = ErrorResponse)
    )
)]
pub async fn list_by_property(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
) -> ApiResult<Vec<ReviewResponse>> {
    let property_id: PropertyId = parse_id(&property_id, "property")?;
    debug!("List reviews by property: {}", property_id);

    ok(state.review_service.list_by_property(property_id).await?)
}

/// List the reviews written by a tenant.
#[utoipa::path(
    get,
    path = "/api/v1/reviews/tenant/{tenant_id}",
    tag = "reviews",
    params(("tenant_id" = i64, Path, description = "Tenant id")),
    responses(
        (status = 200, description = "Reviews by the tenant", body = [ReviewResponse]),
        (status = 404, description = "Tenant not found", body = ErrorResponse)
    )
)]
pub async fn list_by_tenant(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
) -> ApiResult<Vec<ReviewResponse>> {
    let tenant_id: UserId = parse_id(&tenant_id, "tenant")?;
    debug!("List reviews by tenant: {}", tenant_id);

    ok(state.review_service.list_by_tenant(tenant_id).await?)
}

/// Review a property (tenants and admins, once per property).
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    tag = "reviews",
    security(("bearer_auth" = [])),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Invalid review", body = ErrorResponse),
        (status = 409, description = "Property already reviewed", body = ErrorResponse)
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> Result<Created<ReviewResponse>, AppError> {
    debug!("Create review request for property: {}", request.property_id);

    user.require_permission(Permission::ReviewCreate)?;

    let response = state.review_service.create_review(&user, request).await?;
    Ok(created(response))
}

/// Edit a review (its author or an admin).
#[utoipa::path(
    put,
    path = "/api/v1/reviews/{id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Review id")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse)
    )
)]
pub async fn update_review(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateReviewRequest>,
) -> ApiResult<ReviewResponse> {
    let id: ReviewId = parse_id(&id, "review")?;
    debug!("Update review request: {}", id);

    ok(state.review_service.update_review(&user, id, request).await?)
}

/// Delete a review (its author or an admin).
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Review id")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse)
    )
)]
pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: ReviewId = parse_id(&id, "review")?;
    debug!("Delete review request: {}", id);

    state.review_service.delete_review(&user, id).await?;
    Ok(no_content())
}
