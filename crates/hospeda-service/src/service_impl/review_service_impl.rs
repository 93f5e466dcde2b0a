//! Review service implementation.

use crate::cache::{cache_keys, CacheGateway, EntityKind, Mutation};
use crate::dto::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};
use crate::review_service::ReviewService;
use async_trait::async_trait;
use hospeda_core::{
    HospedaError, HospedaResult, NewReview, PropertyId, Review, ReviewId, UserId, ValidateExt,
};
use hospeda_repository::{PropertyRepository, ReviewRepository, UserRepository};
use hospeda_security::{Claims, ClaimsExt};
use std::sync::Arc;
use tracing::{debug, info};

/// Cache-backed review service.
pub struct ReviewServiceImpl {
    review_repository: Arc<dyn ReviewRepository>,
    property_repository: Arc<dyn PropertyRepository>,
    user_repository: Arc<dyn UserRepository>,
    cache: CacheGateway,
}

impl ReviewServiceImpl {
    /// Creates a new review service.
    pub fn new(
        review_repository: Arc<dyn ReviewRepository>,
        property_repository: Arc<dyn PropertyRepository>,
        user_repository: Arc<dyn UserRepository>,
        cache: CacheGateway,
    ) -> Self {
        Self {
            review_repository,
            property_repository,
            user_repository,
            cache,
        }
    }

    async fn load(&self, id: ReviewId) -> HospedaResult<Review> {
        self.review_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| HospedaError::not_found("Review", id))
    }

    async fn ensure_property_exists(&self, id: PropertyId) -> HospedaResult<()> {
        match self.property_repository.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(HospedaError::not_found("Property", id)),
        }
    }

    async fn ensure_user_exists(&self, id: UserId) -> HospedaResult<()> {
        match self.user_repository.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(HospedaError::not_found("User", id)),
        }
    }
}

fn to_responses(reviews: Vec<Review>) -> Vec<ReviewResponse> {
    reviews.into_iter().map(ReviewResponse::from).collect()
}

#[async_trait]
impl ReviewService for ReviewServiceImpl {
    async fn list_reviews(&self) -> HospedaResult<Vec<ReviewResponse>> {
        debug!("Listing reviews");

        self.cache
            .read_through(&cache_keys::all_reviews(), cache_keys::REVIEW_TTL, || async {
                Ok(to_responses(self.review_repository.find_all().await?))
            })
            .await
    }

    async fn get_review(&self, id: ReviewId) -> HospedaResult<ReviewResponse> {
        debug!("Getting review: {}", id);

        self.cache
            .read_through(&cache_keys::review_by_id(id), cache_keys::REVIEW_TTL, || async {
                self.load(id).await.map(ReviewResponse::from)
            })
            .await
    }

    async fn list_by_property(&self, property_id: PropertyId) -> HospedaResult<Vec<ReviewResponse>> {
        debug!("Listing reviews of property: {}", property_id);

        self.cache
            .read_through(
                &cache_keys::reviews_by_property(property_id),
                cache_keys::REVIEW_TTL,
                || async {
                    self.ensure_property_exists(property_id).await?;
                    Ok(to_responses(
                        self.review_repository.find_by_property(property_id).await?,
                    ))
                },
            )
            .await
    }

    async fn list_by_tenant(&self, tenant_id: UserId) -> HospedaResult<Vec<ReviewResponse>> {
        debug!("Listing reviews by tenant: {}", tenant_id);

        self.cache
            .read_through(
                &cache_keys::reviews_by_tenant(tenant_id),
                cache_keys::REVIEW_TTL,
                || async {
                    self.ensure_user_exists(tenant_id).await?;
                    Ok(to_responses(
                        self.review_repository.find_by_tenant(tenant_id).await?,
                    ))
                },
            )
            .await
    }

    async fn create_review(
        &self,
        caller: &Claims,
        request: CreateReviewRequest,
    ) -> HospedaResult<ReviewResponse> {
        debug!("Creating review for property: {}", request.property_id);
        request.validate_request()?;

        let tenant_id = match request.tenant_id {
            Some(tenant_id) if caller.role.is_admin() => tenant_id,
            _ => caller.user_id(),
        };
        self.ensure_property_exists(request.property_id).await?;
        self.ensure_user_exists(tenant_id).await?;

        if self
            .review_repository
            .find_by_tenant_and_property(tenant_id, request.property_id)
            .await?
            .is_some()
        {
            return Err(HospedaError::Conflict(format!(
                "User {tenant_id} has already reviewed property {}",
                request.property_id
            )));
        }

        let review = self
            .review_repository
            .create(&NewReview {
                property_id: request.property_id,
                tenant_id,
                rating: request.rating,
                comment: request.comment,
            })
            .await?;

        self.cache.invalidate(EntityKind::Review, Mutation::Create);

        info!("Review created: {} on property {}", review.id, review.property_id);
        Ok(ReviewResponse::from(review))
    }

    async fn update_review(
        &self,
        caller: &Claims,
        id: ReviewId,
        request: UpdateReviewRequest,
    ) -> HospedaResult<ReviewResponse> {
        debug!("Updating review: {}", id);
        request.validate_request()?;

        let mut review = self.load(id).await?;
        caller.require_owner_or_admin(review.tenant_id, "review")?;

        if let Some(rating) = request.rating {
            review.rating = rating;
        }
        if let Some(comment) = request.comment {
            review.comment = comment;
        }
        let updated = self.review_repository.update(&review).await?;

        self.cache.invalidate(EntityKind::Review, Mutation::Update);

        info!("Review updated: {}", id);
        Ok(ReviewResponse::from(updated))
    }

    async fn delete_review(&self, caller: &Claims, id: ReviewId) -> HospedaResult<()> {
        debug!("Deleting review: {}", id);

        let review = self.load(id).await?;
        caller.require_owner_or_admin(review.tenant_id, "review")?;

        if !self.review_repository.delete(id).await? {
            return Err(HospedaError::not_found("Review", id));
        }

        self.cache.invalidate(EntityKind::Review, Mutation::Delete);

        info!("Review deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for ReviewServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewServiceImpl").finish_non_exhaustive()
    }
}
