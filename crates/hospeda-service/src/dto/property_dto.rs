//! Property-related DTOs.

use chrono::{DateTime, Utc};
use hospeda_core::rules::{image_urls, not_blank};
use hospeda_core::{Location, Property, PropertyId, PropertyKind, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to publish a property.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePropertyRequest {
    /// Only honoured for admins; owners always publish under their own id.
    pub owner_id: Option<UserId>,

    #[validate(
        length(min = 5, max = 100, message = "Title must be 5-100 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(nested)]
    pub location: Location,

    /// Price per night.
    #[validate(range(exclusive_min = 0.0, message = "Price must be positive"))]
    pub price: f64,

    pub kind: PropertyKind,

    /// Defaults to `true`.
    pub available: Option<bool>,

    #[validate(custom(function = "image_urls"))]
    pub images: Option<Vec<String>>,
}

/// Partial location change; absent parts keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct LocationUpdate {
    #[validate(length(min = 1, max = 100, message = "Province is required"))]
    pub province: Option<String>,

    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Address is required"))]
    pub address: Option<String>,
}

impl LocationUpdate {
    /// Applies the present parts onto `location`.
    pub fn apply_to(self, location: &mut Location) {
        if let Some(province) = self.province {
            location.province = province;
        }
        if let Some(city) = self.city {
            location.city = city;
        }
        if let Some(address) = self.address {
            location.address = address;
        }
    }
}

/// Partial property update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePropertyRequest {
    #[validate(length(min = 5, max = 100, message = "Title must be 5-100 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(nested)]
    pub location: Option<LocationUpdate>,

    #[validate(range(exclusive_min = 0.0, message = "Price must be positive"))]
    pub price: Option<f64>,

    pub kind: Option<PropertyKind>,

    pub available: Option<bool>,

    #[validate(custom(function = "image_urls"))]
    pub images: Option<Vec<String>>,
}

impl UpdatePropertyRequest {
    /// Applies the present fields onto a stored property.
    pub fn apply_to(self, property: &mut Property) {
        if let Some(title) = self.title {
            property.title = title;
        }
        if let Some(description) = self.description {
            property.description = Some(description);
        }
        if let Some(location) = self.location {
            location.apply_to(&mut property.location);
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(kind) = self.kind {
            property.kind = kind;
        }
        if let Some(available) = self.available {
            property.available = available;
        }
        if let Some(images) = self.images {
            property.images = images;
        }
    }
}

/// Property response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PropertyResponse {
    pub id: PropertyId,
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub location: Location,
    pub price: f64,
    pub kind: PropertyKind,
    pub available: bool,
    pub published_at: DateTime<Utc>,
    pub images: Vec<String>,
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            owner_id: property.owner_id,
            title: property.title,
            description: property.description,
            location: property.location,
            price: property.price,
            kind: property.kind,
            available: property.available,
            published_at: property.published_at,
            images: property.images,
        }
    }
}
