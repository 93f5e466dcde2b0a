//! Account and booking status value objects.

use crate::HospedaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account is active.
    #[default]
    Active,
    /// Account was deactivated by its holder or an admin.
    Inactive,
    /// Account is suspended.
    Suspended,
}

impl AccountStatus {
    /// Checks if the user can log in.
    #[must_use]
    pub const fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Stable storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }
}

impl FromStr for AccountStatus {
    type Err = HospedaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "suspended" => Ok(Self::Suspended),
            other => Err(HospedaError::validation(format!("Unknown account status: {other}"))),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting the owner's decision.
    #[default]
    Pending,
    /// Accepted by the owner.
    Accepted,
    /// Rejected by the owner.
    Rejected,
    /// Cancelled by the tenant.
    Cancelled,
}

impl BookingStatus {
    /// Returns true once the booking can no longer change state.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }

    /// Stable storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = HospedaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(HospedaError::validation(format!("Unknown booking status: {other}"))),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_status_login() {
        assert!(AccountStatus::Active.can_login());
        assert!(!AccountStatus::Inactive.can_login());
        assert!(!AccountStatus::Suspended.can_login());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(AccountStatus::default(), AccountStatus::Active);
        assert_eq!(BookingStatus::default(), BookingStatus::Pending);
    }

    #[test]
    fn test_booking_status_round_trip_through_storage() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Accepted,
            BookingStatus::Rejected,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert!("confirmed".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_final_states() {
        assert!(BookingStatus::Cancelled.is_final());
        assert!(!BookingStatus::Accepted.is_final());
    }
}
