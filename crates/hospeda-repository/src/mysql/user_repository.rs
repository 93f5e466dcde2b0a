//! MySQL user repository implementation.

use super::last_insert_id;
use crate::{traits::UserRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hospeda_core::{Email, HospedaError, HospedaResult, NewUser, User, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const SELECT_USER: &str = r#"
    SELECT id, name, email, password_hash, role, status, registered_at
    FROM users
"#;

/// MySQL user repository implementation.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    status: String,
    registered_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = HospedaError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            name: row.name,
            email: Email::from_trusted(row.email),
            password_hash: row.password_hash,
            role: row.role.parse()?,
            status: row.status.parse()?,
            registered_at: row.registered_at,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_all(&self) -> HospedaResult<Vec<User>> {
        debug!("Finding all users");

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{SELECT_USER} ORDER BY registered_at DESC, id DESC"
        ))
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(&self, id: UserId) -> HospedaResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> HospedaResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "{SELECT_USER} WHERE LOWER(email) = LOWER(?)"
        ))
        .bind(email.trim())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> HospedaResult<bool> {
        let result: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM users WHERE LOWER(email) = LOWER(?) LIMIT 1")
                .bind(email.trim())
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(result.is_some())
    }

    async fn create(&self, user: &NewUser) -> HospedaResult<User> {
        debug!("Creating user: {}", user.email);

        // MySQL doesn't support RETURNING, so insert then select
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash, role, status)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.status.as_str())
        .execute(self.pool.inner())
        .await?;

        let id = UserId(last_insert_id(&result)?);
        self.find_by_id(id)
            .await?
            .ok_or_else(|| HospedaError::internal("Failed to fetch inserted user"))
    }

    async fn update(&self, user: &User) -> HospedaResult<User> {
        debug!("Updating user: {}", user.id);

        sqlx::query(
            r#"
            UPDATE users
            SET name = ?, email = ?, password_hash = ?, role = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.status.as_str())
        .bind(user.id.into_inner())
        .execute(self.pool.inner())
        .await?;

        // Fetch the updated row
        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| HospedaError::not_found("User", user.id))
    }

    async fn delete(&self, id: UserId) -> HospedaResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository").finish_non_exhaustive()
    }
}
