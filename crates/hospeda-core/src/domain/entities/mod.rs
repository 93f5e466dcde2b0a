//! Domain entities.

mod booking;
mod property;
mod review;
mod user;

pub use booking::{ensure_date_range, Booking, NewBooking};
pub use property::{NewProperty, Property};
pub use review::{NewReview, Review};
pub use user::{NewUser, User};
