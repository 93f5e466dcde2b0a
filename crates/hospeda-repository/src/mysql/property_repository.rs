//! MySQL property repository implementation.

use super::last_insert_id;
use crate::{traits::PropertyRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hospeda_core::{
    HospedaError, HospedaResult, Location, NewProperty, Property, PropertyId, UserId,
};
use sqlx::types::Json;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const SELECT_PROPERTY: &str = r#"
    SELECT id, owner_id, title, description, location, price, kind,
           available, published_at, images
    FROM properties
"#;

const NEWEST_FIRST: &str = "ORDER BY published_at DESC, id DESC";

/// MySQL property repository implementation.
#[derive(Clone)]
pub struct MySqlPropertyRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlPropertyRepository {
    /// Creates a new MySQL property repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PropertyRow {
    id: i64,
    owner_id: i64,
    title: String,
    description: Option<String>,
    location: Json<Location>,
    price: f64,
    kind: String,
    available: bool,
    published_at: DateTime<Utc>,
    images: Json<Vec<String>>,
}

impl TryFrom<PropertyRow> for Property {
    type Error = HospedaError;

    fn try_from(row: PropertyRow) -> Result<Self, Self::Error> {
        Ok(Property {
            id: PropertyId(row.id),
            owner_id: UserId(row.owner_id),
            title: row.title,
            description: row.description,
            location: row.location.0,
            price: row.price,
            kind: row.kind.parse()?,
            available: row.available,
            published_at: row.published_at,
            images: row.images.0,
        })
    }
}

fn into_properties(rows: Vec<PropertyRow>) -> HospedaResult<Vec<Property>> {
    rows.into_iter().map(Property::try_from).collect()
}

#[async_trait]
impl PropertyRepository for MySqlPropertyRepository {
    async fn find_all(&self) -> HospedaResult<Vec<Property>> {
        debug!("Finding all properties");

        let rows = sqlx::query_as::<_, PropertyRow>(&format!("{SELECT_PROPERTY} {NEWEST_FIRST}"))
            .fetch_all(self.pool.inner())
            .await?;

        into_properties(rows)
    }

    async fn find_by_id(&self, id: PropertyId) -> HospedaResult<Option<Property>> {
        debug!("Finding property by id: {}", id);

        let row = sqlx::query_as::<_, PropertyRow>(&format!("{SELECT_PROPERTY} WHERE id = ?"))
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Property::try_from).transpose()
    }

    async fn find_by_owner(&self, owner_id: UserId) -> HospedaResult<Vec<Property>> {
        debug!("Finding properties by owner: {}", owner_id);

        let rows = sqlx::query_as::<_, PropertyRow>(&format!(
            "{SELECT_PROPERTY} WHERE owner_id = ? {NEWEST_FIRST}"
        ))
        .bind(owner_id.into_inner())
        .fetch_all(self.pool.inner())
        .await?;

        into_properties(rows)
    }

    async fn find_by_location(&self, location: &str) -> HospedaResult<Vec<Property>> {
        debug!("Finding properties by location: {}", location);

        let term = location.trim();
        let rows = sqlx::query_as::<_, PropertyRow>(&format!(
            r#"{SELECT_PROPERTY}
            WHERE LOWER(JSON_UNQUOTE(JSON_EXTRACT(location, '$.city'))) = LOWER(?)
               OR LOWER(JSON_UNQUOTE(JSON_EXTRACT(location, '$.province'))) = LOWER(?)
            {NEWEST_FIRST}"#
        ))
        .bind(term)
        .bind(term)
        .fetch_all(self.pool.inner())
        .await?;

        into_properties(rows)
    }

    async fn create(&self, property: &NewProperty) -> HospedaResult<Property> {
        debug!("Creating property for owner {}: {}", property.owner_id, property.title);

        let result = sqlx::query(
            r#"
            INSERT INTO properties (owner_id, title, description, location, price, kind,
                                    available, images)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(property.owner_id.into_inner())
        .bind(&property.title)
        .bind(&property.description)
        .bind(Json(&property.location))
        .bind(property.price)
        .bind(property.kind.as_str())
        .bind(property.available)
        .bind(Json(&property.images))
        .execute(self.pool.inner())
        .await?;

        let id = PropertyId(last_insert_id(&result)?);
        self.find_by_id(id)
            .await?
            .ok_or_else(|| HospedaError::internal("Failed to fetch inserted property"))
    }

    async fn update(&self, property: &Property) -> HospedaResult<Property> {
        debug!("Updating property: {}", property.id);

        sqlx::query(
            r#"
            UPDATE properties
            SET title = ?, description = ?, location = ?, price = ?, kind = ?,
                available = ?, images = ?
            WHERE id = ?
            "#,
        )
        .bind(&property.title)
        .bind(&property.description)
        .bind(Json(&property.location))
        .bind(property.price)
        .bind(property.kind.as_str())
        .bind(property.available)
        .bind(Json(&property.images))
        .bind(property.id.into_inner())
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(property.id)
            .await?
            .ok_or_else(|| HospedaError::not_found("Property", property.id))
    }

    async fn delete(&self, id: PropertyId) -> HospedaResult<bool> {
        debug!("Deleting property: {}", id);

        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlPropertyRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlPropertyRepository").finish_non_exhaustive()
    }
}
