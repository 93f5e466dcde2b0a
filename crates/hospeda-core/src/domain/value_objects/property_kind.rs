//! Property kind value object.

use crate::HospedaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of dwelling being listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    House,
    Apartment,
    /// Horizontal property unit.
    Ph,
    Other,
}

impl PropertyKind {
    /// Stable storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Apartment => "apartment",
            Self::Ph => "ph",
            Self::Other => "other",
        }
    }
}

impl FromStr for PropertyKind {
    type Err = HospedaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "house" => Ok(Self::House),
            "apartment" => Ok(Self::Apartment),
            "ph" => Ok(Self::Ph),
            "other" => Ok(Self::Other),
            other => Err(HospedaError::validation(format!("Unknown property kind: {other}"))),
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("PH".parse::<PropertyKind>().unwrap(), PropertyKind::Ph);
        assert_eq!("apartment".parse::<PropertyKind>().unwrap(), PropertyKind::Apartment);
        assert!("castle".parse::<PropertyKind>().is_err());
    }
}
