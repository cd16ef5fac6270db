//! User models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use paseo_core::{Email, UserId, UserRole};

/// A user account.
///
/// The credential hash is deliberately not part of this struct; it is only
/// read by the CLI when creating accounts and never leaves the database
/// through the API.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email, unique per account.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Authorization role.
    pub role: UserRole,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Minimal user info embedded in order listings.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub email: Email,
    pub name: String,
}

/// Request-scoped identity resolved from the session token.
///
/// Handlers receive this explicitly (via the auth extractors) instead of
/// reading any global session state.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Authorization role for this request.
    pub role: UserRole,
}
