//! Session token commands.
//!
//! There are no HTTP login routes; operators (and integration tests) obtain
//! identity by minting a token here and presenting it as
//! `Authorization: Bearer <token>`.

use paseo_core::Email;
use paseo_server::db::{SessionRepository, UserRepository};

use super::connect;

/// Mint a session token for an existing user.
///
/// # Errors
///
/// Returns an error if the user does not exist or the database is
/// unreachable.
pub async fn issue(email: &str, ttl_hours: i64) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email)?;

    let pool = connect().await?;

    let user = UserRepository::new(&pool)
        .get_by_email(&email)
        .await?
        .ok_or_else(|| format!("no user with email {email}"))?;

    let session = SessionRepository::new(&pool)
        .create(user.id, ttl_hours)
        .await?;

    tracing::info!(
        user_id = %user.id,
        token = %session.token,
        expires_at = %session.expires_at,
        "session issued"
    );

    Ok(())
}

/// Delete expired session tokens.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn purge() -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;

    let deleted = SessionRepository::new(&pool).purge_expired().await?;
    tracing::info!(deleted, "expired sessions purged");

    Ok(())
}
