//! Booking service implementation.

use crate::booking_service::BookingService;
use crate::cache::{cache_keys, CacheGateway, EntityKind, Mutation};
use crate::dto::{
    BookingResponse, CreateBookingRequest, UpdateBookingRequest, UpdateBookingStatusRequest,
};
use async_trait::async_trait;
use hospeda_core::{
    ensure_date_range, Booking, BookingId, BookingStatus, HospedaError, HospedaResult,
    NewBooking, Property, PropertyId, UserId,
};
use hospeda_repository::{BookingRepository, PropertyRepository, UserRepository};
use hospeda_security::{Claims, ClaimsExt};
use std::sync::Arc;
use tracing::{debug, info};

/// Cache-backed booking service.
pub struct BookingServiceImpl {
    booking_repository: Arc<dyn BookingRepository>,
    property_repository: Arc<dyn PropertyRepository>,
    user_repository: Arc<dyn UserRepository>,
    cache: CacheGateway,
}

impl BookingServiceImpl {
    /// Creates a new booking service.
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        property_repository: Arc<dyn PropertyRepository>,
        user_repository: Arc<dyn UserRepository>,
        cache: CacheGateway,
    ) -> Self {
        Self {
            booking_repository,
            property_repository,
            user_repository,
            cache,
        }
    }

    async fn load(&self, id: BookingId) -> HospedaResult<Booking> {
        self.booking_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| HospedaError::not_found("Booking", id))
    }

    async fn load_property(&self, id: PropertyId) -> HospedaResult<Property> {
        self.property_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| HospedaError::not_found("Property", id))
    }

    async fn ensure_user_exists(&self, id: UserId) -> HospedaResult<()> {
        match self.user_repository.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(HospedaError::not_found("User", id)),
        }
    }
}

fn to_responses(bookings: Vec<Booking>) -> Vec<BookingResponse> {
    bookings.into_iter().map(BookingResponse::from).collect()
}

#[async_trait]
impl BookingService for BookingServiceImpl {
    async fn list_bookings(&self) -> HospedaResult<Vec<BookingResponse>> {
        debug!("Listing bookings");

        self.cache
            .read_through(
                &cache_keys::all_bookings(),
                cache_keys::BOOKING_LIST_TTL,
                || async { Ok(to_responses(self.booking_repository.find_all().await?)) },
            )
            .await
    }

    async fn get_booking(&self, id: BookingId) -> HospedaResult<BookingResponse> {
        debug!("Getting booking: {}", id);

        self.cache
            .read_through(&cache_keys::booking_by_id(id), cache_keys::BOOKING_TTL, || async {
                self.load(id).await.map(BookingResponse::from)
            })
            .await
    }

    async fn list_by_tenant(&self, tenant_id: UserId) -> HospedaResult<Vec<BookingResponse>> {
        debug!("Listing bookings of tenant: {}", tenant_id);

        self.cache
            .read_through(
                &cache_keys::bookings_by_tenant(tenant_id),
                cache_keys::BOOKING_LIST_TTL,
                || async {
                    self.ensure_user_exists(tenant_id).await?;
                    Ok(to_responses(
                        self.booking_repository.find_by_tenant(tenant_id).await?,
                    ))
                },
            )
            .await
    }

    async fn list_by_property(
        &self,
        property_id: PropertyId,
    ) -> HospedaResult<Vec<BookingResponse>> {
        debug!("Listing bookings of property: {}", property_id);

        self.cache
            .read_through(
                &cache_keys::bookings_by_property(property_id),
                cache_keys::BOOKING_LIST_TTL,
                || async {
                    self.load_property(property_id).await?;
                    Ok(to_responses(
                        self.booking_repository.find_by_property(property_id).await?,
                    ))
                },
            )
            .await
    }

    async fn list_by_owner(&self, owner_id: UserId) -> HospedaResult<Vec<BookingResponse>> {
        debug!("Listing bookings for owner: {}", owner_id);

        self.cache
            .read_through(
                &cache_keys::bookings_by_owner(owner_id),
                cache_keys::BOOKING_LIST_TTL,
                || async {
                    self.ensure_user_exists(owner_id).await?;
                    Ok(to_responses(
                        self.booking_repository.find_by_owner(owner_id).await?,
                    ))
                },
            )
            .await
    }

    async fn create_booking(
        &self,
        caller: &Claims,
        request: CreateBookingRequest,
    ) -> HospedaResult<BookingResponse> {
        debug!("Creating booking for property: {}", request.property_id);
        ensure_date_range(request.start_date, request.end_date)?;

        let tenant_id = match request.tenant_id {
            Some(tenant_id) if caller.role.is_admin() => tenant_id,
            _ => caller.user_id(),
        };
        self.load_property(request.property_id).await?;
        self.ensure_user_exists(tenant_id).await?;

        let booking = self
            .booking_repository
            .create(&NewBooking {
                property_id: request.property_id,
                tenant_id,
                start_date: request.start_date,
                end_date: request.end_date,
            })
            .await?;

        self.cache.invalidate(EntityKind::Booking, Mutation::Create);

        info!(
            "Booking created: {} for property {} by tenant {}",
            booking.id, booking.property_id, tenant_id
        );
        Ok(BookingResponse::from(booking))
    }

    async fn update_booking(
        &self,
        caller: &Claims,
        id: BookingId,
        request: UpdateBookingRequest,
    ) -> HospedaResult<BookingResponse> {
        debug!("Updating booking: {}", id);

        let mut booking = self.load(id).await?;
        caller.require_owner_or_admin(booking.tenant_id, "booking")?;

        if booking.status.is_final() {
            return Err(HospedaError::Conflict(format!(
                "Booking {id} is already {}",
                booking.status
            )));
        }

        let start_date = request.start_date.unwrap_or(booking.start_date);
        let end_date = request.end_date.unwrap_or(booking.end_date);
        ensure_date_range(start_date, end_date)?;
        booking.start_date = start_date;
        booking.end_date = end_date;

        let updated = self.booking_repository.update(&booking).await?;

        self.cache.invalidate(EntityKind::Booking, Mutation::Update);

        info!("Booking updated: {}", id);
        Ok(BookingResponse::from(updated))
    }

    async fn update_status(
        &self,
        caller: &Claims,
        id: BookingId,
        request: UpdateBookingStatusRequest,
    ) -> HospedaResult<BookingResponse> {
        debug!("Changing booking {} status to {}", id, request.status);

        let mut booking = self.load(id).await?;

        let tenant_cancelling =
            request.status == BookingStatus::Cancelled && caller.is_self(booking.tenant_id);
        if !tenant_cancelling {
            let property = self.load_property(booking.property_id).await?;
            caller.require_owner_or_admin(property.owner_id, "booking")?;
        }

        if booking.status.is_final() {
            return Err(HospedaError::Conflict(format!(
                "Booking {id} is already {}",
                booking.status
            )));
        }

        booking.status = request.status;
        let updated = self.booking_repository.update(&booking).await?;

        self.cache.invalidate(EntityKind::Booking, Mutation::StatusChange);

        info!("Booking {} is now {}", id, updated.status);
        Ok(BookingResponse::from(updated))
    }

    async fn delete_booking(&self, caller: &Claims, id: BookingId) -> HospedaResult<()> {
        debug!("Deleting booking: {}", id);

        let booking = self.load(id).await?;
        caller.require_owner_or_admin(booking.tenant_id, "booking")?;

        if !self.booking_repository.delete(id).await? {
            return Err(HospedaError::not_found("Booking", id));
        }

        self.cache.invalidate(EntityKind::Booking, Mutation::Delete);

        info!("Booking deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for BookingServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingServiceImpl").finish_non_exhaustive()
    }
}
