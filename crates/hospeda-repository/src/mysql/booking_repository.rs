//! MySQL booking repository implementation.

use super::last_insert_id;
use crate::{traits::BookingRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use hospeda_core::{
    Booking, BookingId, BookingStatus, HospedaError, HospedaResult, NewBooking, PropertyId, UserId,
};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const SELECT_BOOKING: &str = r#"
    SELECT b.id, b.property_id, b.tenant_id, b.start_date, b.end_date, b.status, b.requested_at
    FROM bookings b
"#;

const NEWEST_FIRST: &str = "ORDER BY b.requested_at DESC, b.id DESC";

/// MySQL booking repository implementation.
#[derive(Clone)]
pub struct MySqlBookingRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlBookingRepository {
    /// Creates a new MySQL booking repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }

    async fn fetch_where(&self, clause: &str, id: i64) -> HospedaResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "{SELECT_BOOKING} {clause} {NEWEST_FIRST}"
        ))
        .bind(id)
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }
}

#[derive(Debug, FromRow)]
struct BookingRow {
    id: i64,
    property_id: i64,
    tenant_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: String,
    requested_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = HospedaError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: BookingId(row.id),
            property_id: PropertyId(row.property_id),
            tenant_id: UserId(row.tenant_id),
            start_date: row.start_date,
            end_date: row.end_date,
            status: row.status.parse()?,
            requested_at: row.requested_at,
        })
    }
}

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
    async fn find_all(&self) -> HospedaResult<Vec<Booking>> {
        debug!("Finding all bookings");

        let rows = sqlx::query_as::<_, BookingRow>(&format!("{SELECT_BOOKING} {NEWEST_FIRST}"))
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn find_by_id(&self, id: BookingId) -> HospedaResult<Option<Booking>> {
        debug!("Finding booking by id: {}", id);

        let row = sqlx::query_as::<_, BookingRow>(&format!("{SELECT_BOOKING} WHERE b.id = ?"))
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Booking::try_from).transpose()
    }

    async fn find_by_tenant(&self, tenant_id: UserId) -> HospedaResult<Vec<Booking>> {
        debug!("Finding bookings by tenant: {}", tenant_id);
        self.fetch_where("WHERE b.tenant_id = ?", tenant_id.into_inner())
            .await
    }

    async fn find_by_property(&self, property_id: PropertyId) -> HospedaResult<Vec<Booking>> {
        debug!("Finding bookings by property: {}", property_id);
        self.fetch_where("WHERE b.property_id = ?", property_id.into_inner())
            .await
    }

    async fn find_by_owner(&self, owner_id: UserId) -> HospedaResult<Vec<Booking>> {
        debug!("Finding bookings by property owner: {}", owner_id);
        self.fetch_where(
            "JOIN properties p ON p.id = b.property_id WHERE p.owner_id = ?",
            owner_id.into_inner(),
        )
        .await
    }

    async fn create(&self, booking: &NewBooking) -> HospedaResult<Booking> {
        debug!(
            "Creating booking for property {} by tenant {}",
            booking.property_id, booking.tenant_id
        );

        let result = sqlx::query(
            r#"
            INSERT INTO bookings (property_id, tenant_id, start_date, end_date, status)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(booking.property_id.into_inner())
        .bind(booking.tenant_id.into_inner())
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(BookingStatus::Pending.as_str())
        .execute(self.pool.inner())
        .await?;

        let id = BookingId(last_insert_id(&result)?);
        self.find_by_id(id)
            .await?
            .ok_or_else(|| HospedaError::internal("Failed to fetch inserted booking"))
    }

    async fn update(&self, booking: &Booking) -> HospedaResult<Booking> {
        debug!("Updating booking: {}", booking.id);

        sqlx::query(
            r#"
            UPDATE bookings
            SET start_date = ?, end_date = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.status.as_str())
        .bind(booking.id.into_inner())
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(booking.id)
            .await?
            .ok_or_else(|| HospedaError::not_found("Booking", booking.id))
    }

    async fn delete(&self, id: BookingId) -> HospedaResult<bool> {
        debug!("Deleting booking: {}", id);

        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlBookingRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlBookingRepository").finish_non_exhaustive()
    }
}
