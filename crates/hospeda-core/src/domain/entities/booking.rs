//! Booking entity.

use super::super::value_objects::BookingStatus;
use crate::{BookingId, FieldError, HospedaError, PropertyId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A tenant's reservation request for a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub property_id: PropertyId,
    pub tenant_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub requested_at: DateTime<Utc>,
}

impl Booking {
    /// Returns true if `user_id` requested this booking.
    #[must_use]
    pub fn is_requested_by(&self, user_id: UserId) -> bool {
        self.tenant_id == user_id
    }

    /// Number of nights covered.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Insert payload for a booking. New bookings always start as pending.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub property_id: PropertyId,
    pub tenant_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Rejects ranges where the stay does not end strictly after it starts.
///
/// Reported as a field error on `end_date` so it renders like any other
/// request validation failure.
pub fn ensure_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), HospedaError> {
    if end <= start {
        return Err(HospedaError::InvalidFields(vec![FieldError {
            field: "end_date".to_string(),
            message: "end_date must be after start_date".to_string(),
            code: "date_range".to_string(),
        }]));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range() {
        assert!(ensure_date_range(date(2025, 1, 10), date(2025, 1, 12)).is_ok());
        assert!(ensure_date_range(date(2025, 1, 10), date(2025, 1, 10)).is_err());
        assert!(ensure_date_range(date(2025, 1, 10), date(2025, 1, 9)).is_err());
    }

    #[test]
    fn test_nights() {
        let booking = Booking {
            id: BookingId(1),
            property_id: PropertyId(2),
            tenant_id: UserId(3),
            start_date: date(2025, 3, 1),
            end_date: date(2025, 3, 5),
            status: BookingStatus::Pending,
            requested_at: Utc::now(),
        };
        assert_eq!(booking.nights(), 4);
        assert!(booking.is_requested_by(UserId(3)));
    }
}
