//! # Hospeda Service
//!
//! Business logic for the rental marketplace.
//!
//! Every read goes through the [`CacheGateway`] read-through path and every
//! write asks the invalidation table which namespaces to clear. Cache trouble
//! never surfaces here: the gateway turns it into a miss.

pub mod auth_service;
pub mod booking_service;
pub mod cache;
pub mod dto;
pub mod service_impl;
pub mod property_service;
pub mod review_service;
pub mod user_service;

#[cfg(test)]
mod test_support;

pub use auth_service::*;
pub use booking_service::*;
pub use cache::*;
pub use dto::*;
pub use service_impl::*;
pub use property_service::*;
pub use review_service::*;
pub use user_service::*;
