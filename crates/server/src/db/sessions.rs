//! Session repository.
//!
//! Sessions back the request-scoped identity context: a token presented by
//! the client is resolved here into a [`CurrentUser`] (id, email, name,
//! role). Tokens are minted by the CLI; the server only reads and expires
//! them.

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use paseo_core::UserId;

use super::RepositoryError;
use crate::models::CurrentUser;

/// A stored session token.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    /// Opaque bearer token.
    pub token: Uuid,
    /// User the token authenticates.
    pub user_id: UserId,
    /// Expiry instant; the token is invalid afterwards.
    pub expires_at: DateTime<Utc>,
    /// When the token was minted.
    pub created_at: DateTime<Utc>,
}

/// Repository for session database operations.
pub struct SessionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Mint a new session token for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        ttl_hours: i64,
    ) -> Result<Session, RepositoryError> {
        let token = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::hours(ttl_hours);

        let session = sqlx::query_as::<_, Session>(
            r"
            INSERT INTO sessions (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token, user_id, expires_at, created_at
            ",
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(self.pool)
        .await?;

        Ok(session)
    }

    /// Resolve a token into the current user, if the session is still valid.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_current_user(
        &self,
        token: Uuid,
    ) -> Result<Option<CurrentUser>, RepositoryError> {
        let user = sqlx::query_as::<_, CurrentUser>(
            r"
            SELECT u.id, u.email, u.name, u.role
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1 AND s.expires_at > now()
            ",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Delete expired sessions.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn purge_expired(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
