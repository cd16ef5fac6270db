//! Database operations for the Paseo `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Accounts with role flags (ADMIN / USER)
//! - `sessions` - Request identity tokens (minted by the CLI)
//! - `categories` - Product categories
//! - `products` - The catalog
//! - `cart_items` - Per-user cart lines
//! - `addresses` - De-duplicated shipping addresses
//! - `orders` / `order_items` - Orders and their frozen line snapshots
//!
//! Repositories use runtime `query_as` with `FromRow` mappings, so the
//! workspace builds without a live database.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p paseo-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod addresses;
pub mod cart;
pub mod categories;
pub mod orders;
pub mod products;
pub mod sessions;
pub mod stats;
pub mod users;

pub use cart::CartRepository;
pub use categories::CategoryRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use sessions::SessionRepository;
pub use stats::StatsRepository;
pub use users::UserRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email or slug).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
