//! Property entity.

use super::super::value_objects::{Location, PropertyKind};
use crate::{PropertyId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rental listing published by an owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub location: Location,
    /// Price per night, strictly positive.
    pub price: f64,
    pub kind: PropertyKind,
    pub available: bool,
    pub published_at: DateTime<Utc>,
    /// Image URLs, in display order.
    pub images: Vec<String>,
}

/// Insert payload for a property.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub location: Location,
    pub price: f64,
    pub kind: PropertyKind,
    pub available: bool,
    pub images: Vec<String>,
}
