//! OpenAPI documentation configuration.

use crate::controllers::{
    auth_controller, booking_controller, health_controller, property_controller,
    review_controller, user_controller,
};
use hospeda_core::{
    AccountStatus, BookingId, BookingStatus, ErrorResponse, FieldError, Location, PropertyId,
    PropertyKind, ReviewId, UserId, UserRole,
};
use hospeda_service::{
    AuthResponse, BookingResponse, CreateBookingRequest, CreatePropertyRequest,
    CreateReviewRequest, CreateUserRequest, LocationUpdate, LoginRequest, PropertyResponse,
    RefreshTokenRequest, RegisterRequest, ReviewResponse, UpdateBookingRequest,
    UpdateBookingStatusRequest, UpdatePropertyRequest, UpdateReviewRequest, UpdateUserRequest,
    UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Hospeda API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hospeda API",
        version = "1.0.0",
        description = "Rental marketplace: owners publish properties, tenants book and review them. \
                       Successful responses are wrapped as `{ success: true, data }`, failures as \
                       `{ success: false, error }`."
    ),
    paths(
        auth_controller::register,
        auth_controller::login,
        auth_controller::refresh_token,
        auth_controller::get_current_user,
        user_controller::list_users,
        user_controller::create_user,
        user_controller::get_user,
        user_controller::update_user,
        user_controller::delete_user,
        user_controller::list_user_properties,
        property_controller::list_properties,
        property_controller::search_properties,
        property_controller::list_by_owner,
        property_controller::get_property,
        property_controller::create_property,
        property_controller::update_property,
        property_controller::delete_property,
        booking_controller::list_bookings,
        booking_controller::get_booking,
        booking_controller::list_by_tenant,
        booking_controller::list_by_property,
        booking_controller::list_by_owner,
        booking_controller::create_booking,
        booking_controller::update_booking,
        booking_controller::update_booking_status,
        booking_controller::delete_booking,
        review_controller::list_reviews,
        review_controller::get_review,
        review_controller::list_by_property,
        review_controller::list_by_tenant,
        review_controller::create_review,
        review_controller::update_review,
        review_controller::delete_review,
        health_controller::health_check,
        health_controller::readiness_check,
        health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            PropertyId,
            BookingId,
            ReviewId,
            UserRole,
            AccountStatus,
            BookingStatus,
            PropertyKind,
            Location,
            ErrorResponse,
            FieldError,
            LoginRequest,
            RegisterRequest,
            RefreshTokenRequest,
            AuthResponse,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            CreatePropertyRequest,
            UpdatePropertyRequest,
            LocationUpdate,
            PropertyResponse,
            CreateBookingRequest,
            UpdateBookingRequest,
            UpdateBookingStatusRequest,
            BookingResponse,
            CreateReviewRequest,
            UpdateReviewRequest,
            ReviewResponse,
            health_controller::HealthResponse,
            health_controller::ReadinessResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and tokens"),
        (name = "users", description = "User accounts"),
        (name = "properties", description = "Property listings"),
        (name = "bookings", description = "Booking requests"),
        (name = "reviews", description = "Property reviews"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Security addon for JWT Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token authentication"))
                        .build(),
                ),
            );
        }
    }
}
