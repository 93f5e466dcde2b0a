//! Repository trait definitions.
//!
//! Every list method returns rows newest first. Lookups return `Ok(None)`
//! for a missing row; turning that into a 404 is the service's decision.

use async_trait::async_trait;
use hospeda_core::{
    Booking, BookingId, HospedaResult, NewBooking, NewProperty, NewReview, NewUser, Property,
    PropertyId, Review, ReviewId, User, UserId,
};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists every user.
    async fn find_all(&self) -> HospedaResult<Vec<User>>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> HospedaResult<Option<User>>;

    /// Finds a user by (normalised) email.
    async fn find_by_email(&self, email: &str) -> HospedaResult<Option<User>>;

    /// Checks if an email is taken.
    async fn exists_by_email(&self, email: &str) -> HospedaResult<bool>;

    /// Inserts a user and returns the stored row.
    async fn create(&self, user: &NewUser) -> HospedaResult<User>;

    /// Saves every mutable column of an existing user.
    async fn update(&self, user: &User) -> HospedaResult<User>;

    /// Deletes a user; dependent rows go with it.
    async fn delete(&self, id: UserId) -> HospedaResult<bool>;
}

/// Property repository trait.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn find_all(&self) -> HospedaResult<Vec<Property>>;

    async fn find_by_id(&self, id: PropertyId) -> HospedaResult<Option<Property>>;

    async fn find_by_owner(&self, owner_id: UserId) -> HospedaResult<Vec<Property>>;

    /// Case-insensitive match on city or province.
    async fn find_by_location(&self, location: &str) -> HospedaResult<Vec<Property>>;

    async fn create(&self, property: &NewProperty) -> HospedaResult<Property>;

    async fn update(&self, property: &Property) -> HospedaResult<Property>;

    /// Deletes a property together with its bookings and reviews.
    async fn delete(&self, id: PropertyId) -> HospedaResult<bool>;
}

/// Booking repository trait.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_all(&self) -> HospedaResult<Vec<Booking>>;

    async fn find_by_id(&self, id: BookingId) -> HospedaResult<Option<Booking>>;

    async fn find_by_tenant(&self, tenant_id: UserId) -> HospedaResult<Vec<Booking>>;

    async fn find_by_property(&self, property_id: PropertyId) -> HospedaResult<Vec<Booking>>;

    /// Bookings on any property owned by `owner_id`.
    async fn find_by_owner(&self, owner_id: UserId) -> HospedaResult<Vec<Booking>>;

    async fn create(&self, booking: &NewBooking) -> HospedaResult<Booking>;

    async fn update(&self, booking: &Booking) -> HospedaResult<Booking>;

    async fn delete(&self, id: BookingId) -> HospedaResult<bool>;
}

/// Review repository trait.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_all(&self) -> HospedaResult<Vec<Review>>;

    async fn find_by_id(&self, id: ReviewId) -> HospedaResult<Option<Review>>;

    async fn find_by_property(&self, property_id: PropertyId) -> HospedaResult<Vec<Review>>;

    async fn find_by_tenant(&self, tenant_id: UserId) -> HospedaResult<Vec<Review>>;

    /// The single review a tenant may leave on a property, if any.
    async fn find_by_tenant_and_property(
        &self,
        tenant_id: UserId,
        property_id: PropertyId,
    ) -> HospedaResult<Option<Review>>;

    /// Inserts a review; a second review for the same (tenant, property) is a conflict.
    async fn create(&self, review: &NewReview) -> HospedaResult<Review>;

    async fn update(&self, review: &Review) -> HospedaResult<Review>;

    async fn delete(&self, id: ReviewId) -> HospedaResult<bool>;
}
