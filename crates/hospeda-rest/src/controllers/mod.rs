//! REST API controllers.

pub mod auth_controller;
pub mod booking_controller;
pub mod health_controller;
pub mod property_controller;
pub mod review_controller;
pub mod user_controller;

pub use health_controller::*;

use crate::responses::AppError;
use hospeda_core::HospedaError;
use std::str::FromStr;

/// Parses a numeric id from a path segment.
pub(crate) fn parse_id<T: FromStr>(raw: &str, resource: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError(HospedaError::Validation(format!("Invalid {resource} id: {raw}"))))
}
