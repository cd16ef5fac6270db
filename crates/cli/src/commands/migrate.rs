//! Database migration command.
//!
//! Migrations live in `crates/server/migrations/` and are embedded into the
//! binary at compile time. They are never run automatically by the server.

use super::connect;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;
    tracing::info!("Migrations complete");

    Ok(())
}
