//! Review service trait definition.

use crate::dto::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};
use async_trait::async_trait;
use hospeda_core::{HospedaResult, PropertyId, ReviewId, UserId};
use hospeda_security::Claims;

/// Review service trait.
#[async_trait]
pub trait ReviewService: Send + Sync {
    async fn list_reviews(&self) -> HospedaResult<Vec<ReviewResponse>>;

    async fn get_review(&self, id: ReviewId) -> HospedaResult<ReviewResponse>;

    async fn list_by_property(&self, property_id: PropertyId) -> HospedaResult<Vec<ReviewResponse>>;

    async fn list_by_tenant(&self, tenant_id: UserId) -> HospedaResult<Vec<ReviewResponse>>;

    /// One review per tenant and property; a second one is a conflict.
    async fn create_review(
        &self,
        caller: &Claims,
        request: CreateReviewRequest,
    ) -> HospedaResult<ReviewResponse>;

    async fn update_review(
        &self,
        caller: &Claims,
        id: ReviewId,
        request: UpdateReviewRequest,
    ) -> HospedaResult<ReviewResponse>;

    async fn delete_review(&self, caller: &Claims, id: ReviewId) -> HospedaResult<()>;
}
