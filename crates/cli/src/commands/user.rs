//! User management commands.

use uuid::Uuid;

use paseo_core::{Email, UserRole};
use paseo_server::db::UserRepository;

use super::{connect, hash_password};

/// Create a user account.
///
/// When no password is given a random one is generated and logged.
///
/// # Errors
///
/// Returns an error if the email or role is invalid, the email is already
/// taken, or the database is unreachable.
pub async fn create(
    email: &str,
    name: &str,
    role: &str,
    password: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email)?;
    let role: UserRole = role.parse()?;

    let generated = password.is_none();
    let password = password.map_or_else(generate_password, str::to_owned);
    let password_hash = hash_password(&password)?;

    let pool = connect().await?;
    let user = UserRepository::new(&pool)
        .create(&email, &password_hash, name, role)
        .await?;

    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        role = %user.role,
        "user created"
    );

    if generated {
        tracing::info!(password = %password, "generated password");
    }

    Ok(())
}

fn generate_password() -> String {
    Uuid::new_v4().simple().to_string()
}
