//! Property location value object.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where a property is. Stored as a JSON document alongside the property row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Location {
    #[validate(length(min = 1, max = 100, message = "Province is required"))]
    pub province: String,

    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, max = 255, message = "Address is required"))]
    pub address: String,
}

impl Location {
    /// Case-insensitive match of a search term against the city or province.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        !term.is_empty()
            && (self.city.to_lowercase() == term || self.province.to_lowercase() == term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cordoba() -> Location {
        Location {
            province: "Córdoba".to_string(),
            city: "Villa Carlos Paz".to_string(),
            address: "San Martín 1200".to_string(),
        }
    }

    #[test]
    fn test_matches_city_or_province() {
        let location = cordoba();
        assert!(location.matches("villa carlos paz"));
        assert!(location.matches("Córdoba"));
        assert!(!location.matches("Mendoza"));
        assert!(!location.matches("  "));
    }

    #[test]
    fn test_blank_fields_fail_validation() {
        let mut location = cordoba();
        location.city = String::new();
        assert!(location.validate().is_err());
    }
}
