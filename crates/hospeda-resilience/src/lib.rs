//! # Hospeda Resilience
//!
//! Keyed rate limiting for the HTTP edge and deadline helpers for backend calls.

pub mod rate_limiter;
pub mod timeout;

pub use rate_limiter::*;
pub use timeout::*;
