//! Property listing controller.

use super::parse_id;
use crate::{
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{created, no_content, ok, ApiResult, AppError, Created},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use hospeda_core::{ErrorResponse, Permission, PropertyId, UserId};
use hospeda_security::ClaimsExt;
use hospeda_service::{CreatePropertyRequest, PropertyResponse, UpdatePropertyRequest};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

/// Query string for location search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct LocationQuery {
    /// Province, city or address fragment; case-insensitive.
    #[serde(default)]
    pub location: String,
}

/// Creates the property router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route("/search", get(search_properties))
        .route("/owner/:owner_id", get(list_by_owner))
        .route(
            "/:id",
            get(get_property).put(update_property).delete(delete_property),
        )
}

/// List every property.
#[utoipa::path(
    get,
    path = "/api/v1/properties",
    tag = "properties",
    responses((status = 200, description = "All properties, newest first", body = [PropertyResponse]))
)]
pub async fn list_properties(State(state): State<AppState>) -> ApiResult<Vec<PropertyResponse>> {
    debug!("List properties request");

    ok(state.property_service.list_properties().await?)
}

/// Search properties by location.
#[utoipa::path(
    get,
    path = "/api/v1/properties/search",
    tag = "properties",
    params(LocationQuery),
    responses(
        (status = 200, description = "Matching properties", body = [PropertyResponse]),
        (status = 400, description = "Missing location", body = ErrorResponse)
    )
)]
pub async fn search_properties(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> ApiResult<Vec<PropertyResponse>> {
    debug!("Search properties request: {}", query.location);

    ok(state.property_service.search_by_location(&query.location).await?)
}

/// List the properties of an owner.
#[utoipa::path(
    get,
    path = "/api/v1/properties/owner/{owner_id}",
    tag = "properties",
    params(("owner_id" = i64, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Properties of the owner", body = [PropertyResponse]),
        (status = 404, description = "Owner not found", body = ErrorResponse)
    )
)]
pub async fn list_by_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> ApiResult<Vec<PropertyResponse>> {
    let owner_id: UserId = parse_id(&owner_id, "owner")?;
    debug!("List properties by owner: {}", owner_id);

    ok(state.property_service.list_by_owner(owner_id).await?)
}

/// Get a property by ID.
#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}",
    tag = "properties",
    params(("id" = i64, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property found", body = PropertyResponse),
        (status = 404, description = "Property not found", body = ErrorResponse)
    )
)]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PropertyResponse> {
    let id: PropertyId = parse_id(&id, "property")?;
    debug!("Get property request: {}", id);

    ok(state.property_service.get_property(id).await?)
}

/// Publish a property (owners and admins).
#[utoipa::path(
    post,
    path = "/api/v1/properties",
    tag = "properties",
    security(("bearer_auth" = [])),
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "Property published", body = PropertyResponse),
        (status = 400, description = "Invalid property data", body = ErrorResponse),
        (status = 403, description = "Owners and admins only", body = ErrorResponse)
    )
)]
pub async fn create_property(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreatePropertyRequest>,
) -> Result<Created<PropertyResponse>, AppError> {
    debug!("Create property request: {}", request.title);

    user.require_permission(Permission::PropertyCreate)?;

    let response = state.property_service.create_property(&user, request).await?;
    Ok(created(response))
}

/// Update a property (its owner or an admin).
#[utoipa::path(
    put,
    path = "/api/v1/properties/{id}",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Property id")),
    request_body = UpdatePropertyRequest,
    responses(
        (status = 200, description = "Property updated", body = PropertyResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Property not found", body = ErrorResponse)
    )
)]
pub async fn update_property(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdatePropertyRequest>,
) -> ApiResult<PropertyResponse> {
    let id: PropertyId = parse_id(&id, "property")?;
    debug!("Update property request: {}", id);

    ok(state.property_service.update_property(&user, id, request).await?)
}

/// Delete a property with its bookings and reviews (its owner or an admin).
#[utoipa::path(
    delete,
    path = "/api/v1/properties/{id}",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Property id")),
    responses(
        (status = 204, description = "Property deleted"),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Property not found", body = ErrorResponse)
    )
)]
pub async fn delete_property(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: PropertyId = parse_id(&id, "property")?;
    debug!("Delete property request: {}", id);

    state.property_service.delete_property(&user, id).await?;
    Ok(no_content())
}
