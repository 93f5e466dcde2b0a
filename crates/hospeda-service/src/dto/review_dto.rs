//! Review-related DTOs.

use chrono::{DateTime, Utc};
use hospeda_core::{PropertyId, Review, ReviewId, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to review a property.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    pub property_id: PropertyId,

    /// Only honoured for admins.
    pub tenant_id: Option<UserId>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,

    #[serde(default)]
    #[validate(length(max = 500, message = "Comment must be at most 500 characters"))]
    pub comment: String,
}

/// Partial review update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<u8>,

    #[validate(length(max = 500, message = "Comment must be at most 500 characters"))]
    pub comment: Option<String>,
}

/// Review response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: ReviewId,
    pub property_id: PropertyId,
    pub tenant_id: UserId,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            property_id: review.property_id,
            tenant_id: review.tenant_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(rating: u8, comment: &str) -> CreateReviewRequest {
        CreateReviewRequest {
            property_id: PropertyId(1),
            tenant_id: None,
            rating,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(request(1, "ok").validate().is_ok());
        assert!(request(5, "excelente").validate().is_ok());
        assert!(request(0, "").validate().is_err());
        assert!(request(6, "").validate().is_err());
    }

    #[test]
    fn test_comment_limit() {
        assert!(request(4, &"a".repeat(500)).validate().is_ok());
        assert!(request(4, &"a".repeat(501)).validate().is_err());
    }

    #[test]
    fn test_comment_defaults_to_empty() {
        let request: CreateReviewRequest =
            serde_json::from_str(r#"{"property_id":2,"rating":3}"#).unwrap();
        assert!(request.comment.is_empty());
    }
}
