//! Booking-related DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use hospeda_core::{Booking, BookingId, BookingStatus, PropertyId, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to book a property.
///
/// The date range is checked in the service so the error lands on `end_date`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    pub property_id: PropertyId,

    /// Only honoured for admins; tenants always book for themselves.
    pub tenant_id: Option<UserId>,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,
}

/// Changes the dates of an existing booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Owner decision, or tenant cancellation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

/// Booking response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub id: BookingId,
    pub property_id: PropertyId,
    pub tenant_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub requested_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            property_id: booking.property_id,
            tenant_id: booking.tenant_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            status: booking.status,
            requested_at: booking.requested_at,
        }
    }
}
