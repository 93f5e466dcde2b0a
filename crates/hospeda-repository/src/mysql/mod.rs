//! MySQL repository implementations.

mod booking_repository;
mod property_repository;
mod review_repository;
mod user_repository;

pub use booking_repository::MySqlBookingRepository;
pub use property_repository::MySqlPropertyRepository;
pub use review_repository::MySqlReviewRepository;
pub use user_repository::MySqlUserRepository;

use hospeda_core::{HospedaError, HospedaResult};
use sqlx::mysql::MySqlQueryResult;

/// Reads the auto-increment key assigned by an INSERT.
fn last_insert_id(result: &MySqlQueryResult) -> HospedaResult<i64> {
    i64::try_from(result.last_insert_id())
        .map_err(|_| HospedaError::internal("Inserted id does not fit in BIGINT"))
}
