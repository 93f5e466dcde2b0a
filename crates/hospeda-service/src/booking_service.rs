//! Booking service trait definition.

use crate::dto::{
    BookingResponse, CreateBookingRequest, UpdateBookingRequest, UpdateBookingStatusRequest,
};
use async_trait::async_trait;
use hospeda_core::{BookingId, HospedaResult, PropertyId, UserId};
use hospeda_security::Claims;

/// Booking service trait.
#[async_trait]
pub trait BookingService: Send + Sync {
    async fn list_bookings(&self) -> HospedaResult<Vec<BookingResponse>>;

    async fn get_booking(&self, id: BookingId) -> HospedaResult<BookingResponse>;

    async fn list_by_tenant(&self, tenant_id: UserId) -> HospedaResult<Vec<BookingResponse>>;

    async fn list_by_property(&self, property_id: PropertyId)
        -> HospedaResult<Vec<BookingResponse>>;

    /// Bookings across every property of `owner_id`.
    async fn list_by_owner(&self, owner_id: UserId) -> HospedaResult<Vec<BookingResponse>>;

    /// Books a property; both the property and the tenant must exist.
    async fn create_booking(
        &self,
        caller: &Claims,
        request: CreateBookingRequest,
    ) -> HospedaResult<BookingResponse>;

    /// Changes the dates. Booking tenant or admin only.
    async fn update_booking(
        &self,
        caller: &Claims,
        id: BookingId,
        request: UpdateBookingRequest,
    ) -> HospedaResult<BookingResponse>;

    /// Accept or reject (property owner or admin), or cancel (booking tenant).
    async fn update_status(
        &self,
        caller: &Claims,
        id: BookingId,
        request: UpdateBookingStatusRequest,
    ) -> HospedaResult<BookingResponse>;

    /// Booking tenant or admin only.
    async fn delete_booking(&self, caller: &Claims, id: BookingId) -> HospedaResult<()>;
}
