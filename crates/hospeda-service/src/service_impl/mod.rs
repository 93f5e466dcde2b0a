//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `user_service.rs`).

mod booking_service_impl;
mod property_service_impl;
mod review_service_impl;
mod user_service_impl;

pub use booking_service_impl::BookingServiceImpl;
pub use property_service_impl::PropertyServiceImpl;
pub use review_service_impl::ReviewServiceImpl;
pub use user_service_impl::UserServiceImpl;
