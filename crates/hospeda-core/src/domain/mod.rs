//! # Hospeda Domain
//!
//! Entities and value objects of the rental marketplace: users, properties,
//! bookings and reviews.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
