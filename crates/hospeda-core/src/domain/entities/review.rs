//! Review entity.

use crate::{PropertyId, ReviewId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tenant's rating of a property. At most one per (tenant, property).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub property_id: PropertyId,
    pub tenant_id: UserId,
    /// 1 to 5 stars.
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub property_id: PropertyId,
    pub tenant_id: UserId,
    pub rating: u8,
    pub comment: String,
}
