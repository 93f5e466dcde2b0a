//! Cache key generators and per-view TTLs.
//!
//! Keys follow `<namespace>:<scope>`; the singular namespace holds records by
//! id, the plural one holds derived lists.

use hospeda_core::{BookingId, PropertyId, ReviewId, UserId};
use std::time::Duration;

pub const PROPERTY_LIST_TTL: Duration = Duration::from_secs(1800);
pub const PROPERTY_TTL: Duration = Duration::from_secs(3600);
pub const USER_TTL: Duration = Duration::from_secs(3600);
pub const BOOKING_LIST_TTL: Duration = Duration::from_secs(300);
pub const BOOKING_TTL: Duration = Duration::from_secs(600);
pub const REVIEW_TTL: Duration = Duration::from_secs(1800);

#[must_use]
pub fn all_properties() -> String {
    "properties:all".to_string()
}

#[must_use]
pub fn property_by_id(id: PropertyId) -> String {
    format!("property:{id}")
}

#[must_use]
pub fn properties_by_owner(owner_id: UserId) -> String {
    format!("properties:owner:{owner_id}")
}

/// Location keys are case-insensitive, matching the search itself.
#[must_use]
pub fn properties_by_location(location: &str) -> String {
    format!("properties:location:{}", location.trim().to_lowercase())
}

#[must_use]
pub fn all_users() -> String {
    "users:all".to_string()
}

#[must_use]
pub fn user_by_id(id: UserId) -> String {
    format!("user:{id}")
}

#[must_use]
pub fn all_bookings() -> String {
    "bookings:all".to_string()
}

#[must_use]
pub fn booking_by_id(id: BookingId) -> String {
    format!("booking:{id}")
}

#[must_use]
pub fn bookings_by_tenant(tenant_id: UserId) -> String {
    format!("bookings:tenant:{tenant_id}")
}

#[must_use]
pub fn bookings_by_property(property_id: PropertyId) -> String {
    format!("bookings:property:{property_id}")
}

#[must_use]
pub fn bookings_by_owner(owner_id: UserId) -> String {
    format!("bookings:owner:{owner_id}")
}

#[must_use]
pub fn all_reviews() -> String {
    "reviews:all".to_string()
}

#[must_use]
pub fn review_by_id(id: ReviewId) -> String {
    format!("review:{id}")
}

#[must_use]
pub fn reviews_by_property(property_id: PropertyId) -> String {
    format!("reviews:property:{property_id}")
}

#[must_use]
pub fn reviews_by_tenant(tenant_id: UserId) -> String {
    format!("reviews:tenant:{tenant_id}")
}
