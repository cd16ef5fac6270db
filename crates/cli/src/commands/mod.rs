//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod session;
pub mod user;

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use secrecy::SecretString;
use sqlx::PgPool;

/// Connect to the database named by `PASEO_DATABASE_URL` (or `DATABASE_URL`).
pub(crate) async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let url = std::env::var("PASEO_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| "PASEO_DATABASE_URL not set")?;

    let pool = paseo_server::db::create_pool(&SecretString::from(url)).await?;
    Ok(pool)
}

/// Hash a password with Argon2id and a fresh salt.
pub(crate) fn hash_password(password: &str) -> Result<String, Box<dyn std::error::Error>> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}
