//! # Hospeda Core
//!
//! Core types, traits, and error definitions for Hospeda.
//! This crate provides the domain model (users, properties, bookings, reviews)
//! and the foundational abstractions shared by every layer.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use validation::*;
