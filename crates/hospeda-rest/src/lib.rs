//! # Hospeda REST
//!
//! HTTP surface of the rental marketplace: authentication, users, properties,
//! bookings, reviews and health checks, served by Axum under `/api/v1`.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
