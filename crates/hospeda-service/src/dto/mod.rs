//! Data Transfer Objects (DTOs).
//!
//! Responses are also what the cache stores, so none of them carry secrets.

mod auth_dto;
mod booking_dto;
mod property_dto;
mod review_dto;
mod user_dto;

pub use auth_dto::*;
pub use booking_dto::*;
pub use property_dto::*;
pub use review_dto::*;
pub use user_dto::*;
