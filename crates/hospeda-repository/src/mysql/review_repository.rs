//! MySQL review repository implementation.

use super::last_insert_id;
use crate::{traits::ReviewRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hospeda_core::{HospedaError, HospedaResult, NewReview, PropertyId, Review, ReviewId, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const SELECT_REVIEW: &str = r#"
    SELECT id, property_id, tenant_id, rating, comment, created_at
    FROM reviews
"#;

/// MySQL review repository implementation.
#[derive(Clone)]
pub struct MySqlReviewRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlReviewRepository {
    /// Creates a new MySQL review repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }

    async fn fetch_where(&self, clause: &str, id: i64) -> HospedaResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "{SELECT_REVIEW} {clause} ORDER BY created_at DESC, id DESC"
        ))
        .bind(id)
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }
}

#[derive(Debug, FromRow)]
struct ReviewRow {
    id: i64,
    property_id: i64,
    tenant_id: i64,
    rating: u8,
    comment: String,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: ReviewId(row.id),
            property_id: PropertyId(row.property_id),
            tenant_id: UserId(row.tenant_id),
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ReviewRepository for MySqlReviewRepository {
    async fn find_all(&self) -> HospedaResult<Vec<Review>> {
        debug!("Finding all reviews");

        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "{SELECT_REVIEW} ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn find_by_id(&self, id: ReviewId) -> HospedaResult<Option<Review>> {
        debug!("Finding review by id: {}", id);

        let row = sqlx::query_as::<_, ReviewRow>(&format!("{SELECT_REVIEW} WHERE id = ?"))
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Review::from))
    }

    async fn find_by_property(&self, property_id: PropertyId) -> HospedaResult<Vec<Review>> {
        debug!("Finding reviews by property: {}", property_id);
        self.fetch_where("WHERE property_id = ?", property_id.into_inner())
            .await
    }

    async fn find_by_tenant(&self, tenant_id: UserId) -> HospedaResult<Vec<Review>> {
        debug!("Finding reviews by tenant: {}", tenant_id);
        self.fetch_where("WHERE tenant_id = ?", tenant_id.into_inner())
            .await
    }

    async fn find_by_tenant_and_property(
        &self,
        tenant_id: UserId,
        property_id: PropertyId,
    ) -> HospedaResult<Option<Review>> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "{SELECT_REVIEW} WHERE tenant_id = ? AND property_id = ?"
        ))
        .bind(tenant_id.into_inner())
        .bind(property_id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Review::from))
    }

    async fn create(&self, review: &NewReview) -> HospedaResult<Review> {
        debug!(
            "Creating review for property {} by tenant {}",
            review.property_id, review.tenant_id
        );

        // Duplicate (tenant, property) surfaces as a Conflict via the unique key
        let result = sqlx::query(
            r#"
            INSERT INTO reviews (property_id, tenant_id, rating, comment)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(review.property_id.into_inner())
        .bind(review.tenant_id.into_inner())
        .bind(review.rating)
        .bind(&review.comment)
        .execute(self.pool.inner())
        .await?;

        let id = ReviewId(last_insert_id(&result)?);
        self.find_by_id(id)
            .await?
            .ok_or_else(|| HospedaError::internal("Failed to fetch inserted review"))
    }

    async fn update(&self, review: &Review) -> HospedaResult<Review> {
        debug!("Updating review: {}", review.id);

        sqlx::query("UPDATE reviews SET rating = ?, comment = ? WHERE id = ?")
            .bind(review.rating)
            .bind(&review.comment)
            .bind(review.id.into_inner())
            .execute(self.pool.inner())
            .await?;

        self.find_by_id(review.id)
            .await?
            .ok_or_else(|| HospedaError::not_found("Review", review.id))
    }

    async fn delete(&self, id: ReviewId) -> HospedaResult<bool> {
        debug!("Deleting review: {}", id);

        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlReviewRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlReviewRepository").finish_non_exhaustive()
    }
}
