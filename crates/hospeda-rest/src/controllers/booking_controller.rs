//! Booking controller. Every route requires authentication.

use super::parse_id;
use crate::{
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{created, no_content, ok, ApiResult, AppError, Created},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Router,
};
use hospeda_core::{BookingId, ErrorResponse, Permission, PropertyId, UserId};
use hospeda_security::ClaimsExt;
use hospeda_service::{
    BookingResponse, CreateBookingRequest, UpdateBookingRequest, UpdateBookingStatusRequest,
};
use tracing::debug;

/// Creates the booking router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/tenant/:tenant_id", get(list_by_tenant))
        .route("/property/:property_id", get(list_by_property))
        .route("/owner/:owner_id", get(list_by_owner))
        .route(
            "/:id",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .route("/:id/status", patch(update_booking_status))
}

/// List every booking.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All bookings, newest first", body = [BookingResponse]))
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> ApiResult<Vec<BookingResponse>> {
    debug!("List bookings request");

    ok(state.booking_service.list_bookings().await?)
}

/// Get a booking by ID.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking found", body = BookingResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<BookingResponse> {
    let id: BookingId = parse_id(&id, "booking")?;
    debug!("Get booking request: {}", id);

    ok(state.booking_service.get_booking(id).await?)
}

/// List the bookings of a tenant.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/tenant/{tenant_id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("tenant_id" = i64, Path, description = "Tenant id")),
    responses(
        (status = 200, description = "Bookings of the tenant", body = [BookingResponse]),
        (status = 404, description = "Tenant not found", body = ErrorResponse)
    )
)]
pub async fn list_by_tenant(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(tenant_id): Path<String>,
) -> ApiResult<Vec<BookingResponse>> {
    let tenant_id: UserId = parse_id(&tenant_id, "tenant")?;
    debug!("List bookings by tenant: {}", tenant_id);

    ok(state.booking_service.list_by_tenant(tenant_id).await?)
}

/// List the bookings of a property.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/property/{property_id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("property_id" = i64, Path, description = "Property id")),
    responses(
        (status = 200, description = "Bookings of the property", body = [BookingResponse]),
        (status = 404, description = "Property not found", body = ErrorResponse)
    )
)]
pub async fn list_by_property(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(property_id): Path<String>,
) -> ApiResult<Vec<BookingResponse>> {
    let property_id: PropertyId = parse_id(&property_id, "property")?;
    debug!("List bookings by property: {}", property_id);

    ok(state.booking_service.list_by_property(property_id).await?)
}

/// List the bookings across an owner's properties.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/owner/{owner_id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("owner_id" = i64, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Bookings for the owner's properties", body = [BookingResponse]),
        (status = 404, description = "Owner not found", body = ErrorResponse)
    )
)]
pub async fn list_by_owner(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(owner_id): Path<String>,
) -> ApiResult<Vec<BookingResponse>> {
    let owner_id: UserId = parse_id(&owner_id, "owner")?;
    debug!("List bookings by owner: {}", owner_id);

    ok(state.booking_service.list_by_owner(owner_id).await?)
}

/// Request a booking (tenants and admins).
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking requested", body = BookingResponse),
        (status = 400, description = "Invalid dates", body = ErrorResponse),
        (status = 404, description = "Property or tenant not found", body = ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<Created<BookingResponse>, AppError> {
    debug!("Create booking request for property: {}", request.property_id);

    user.require_permission(Permission::BookingCreate)?;

    let response = state.booking_service.create_booking(&user, request).await?;
    Ok(created(response))
}

/// Change the dates of a booking (its tenant or an admin).
#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Booking id")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = BookingResponse),
        (status = 403, description = "Not the tenant", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    )
)]
pub async fn update_booking(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateBookingRequest>,
) -> ApiResult<BookingResponse> {
    let id: BookingId = parse_id(&id, "booking")?;
    debug!("Update booking request: {}", id);

    ok(state.booking_service.update_booking(&user, id, request).await?)
}

/// Accept, reject or cancel a booking.
#[utoipa::path(
    patch,
    path = "/api/v1/bookings/{id}/status",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Booking id")),
    request_body = UpdateBookingStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = BookingResponse),
        (status = 403, description = "Not allowed to change this booking", body = ErrorResponse),
        (status = 409, description = "Booking already settled", body = ErrorResponse)
    )
)]
pub async fn update_booking_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateBookingStatusRequest>,
) -> ApiResult<BookingResponse> {
    let id: BookingId = parse_id(&id, "booking")?;
    debug!("Update booking status request: {} -> {}", id, request.status);

    ok(state.booking_service.update_status(&user, id, request).await?)
}

/// Delete a booking (its tenant or an admin).
#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 403, description = "Not the tenant", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    )
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: BookingId = parse_id(&id, "booking")?;
    debug!("Delete booking request: {}", id);

    state.booking_service.delete_booking(&user, id).await?;
    Ok(no_content())
}
