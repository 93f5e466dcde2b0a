//! Typed ID wrappers for domain entities.
//!
//! Every entity is keyed by a database-assigned `BIGINT`, so each wrapper is a
//! transparent `i64` newtype. The macro keeps the four of them in lockstep.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wraps a raw database key.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw database key.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// A strongly-typed wrapper for user IDs.
    UserId
);

entity_id!(
    /// A strongly-typed wrapper for property IDs.
    PropertyId
);

entity_id!(
    /// A strongly-typed wrapper for booking IDs.
    BookingId
);

entity_id!(
    /// A strongly-typed wrapper for review IDs.
    ReviewId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_matches_raw_key() {
        assert_eq!(PropertyId::new(42).to_string(), "42");
        assert_eq!(UserId::from(7).into_inner(), 7);
    }

    #[test]
    fn test_id_parsing() {
        let id: BookingId = " 15 ".parse().unwrap();
        assert_eq!(id, BookingId(15));
        assert!("abc".parse::<ReviewId>().is_err());
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&UserId(3)).unwrap();
        assert_eq!(json, "3");
        let back: UserId = serde_json::from_str("3").unwrap();
        assert_eq!(back, UserId(3));
    }
}
