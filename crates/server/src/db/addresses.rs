//! Address persistence.
//!
//! Both functions here run inside the checkout transaction and therefore
//! take an explicit connection instead of the pool.

use sqlx::PgConnection;

use paseo_core::UserId;

use crate::models::Address;

/// Find an existing address for the user with identical street, city, and
/// zip code.
///
/// The comparison is exact string equality; "Calle Mayor 1" and
/// "calle mayor 1" are different addresses.
pub(crate) async fn find_exact(
    conn: &mut PgConnection,
    user_id: UserId,
    street: &str,
    city: &str,
    zip_code: &str,
) -> Result<Option<Address>, sqlx::Error> {
    sqlx::query_as::<_, Address>(
        r"
        SELECT id, user_id, street, city, state, zip_code, country, created_at
        FROM addresses
        WHERE user_id = $1 AND street = $2 AND city = $3 AND zip_code = $4
        LIMIT 1
        ",
    )
    .bind(user_id)
    .bind(street)
    .bind(city)
    .bind(zip_code)
    .fetch_optional(&mut *conn)
    .await
}

/// Create a new address for the user.
pub(crate) async fn create(
    conn: &mut PgConnection,
    user_id: UserId,
    street: &str,
    city: &str,
    state: Option<&str>,
    zip_code: &str,
    country: &str,
) -> Result<Address, sqlx::Error> {
    sqlx::query_as::<_, Address>(
        r"
        INSERT INTO addresses (user_id, street, city, state, zip_code, country)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, street, city, state, zip_code, country, created_at
        ",
    )
    .bind(user_id)
    .bind(street)
    .bind(city)
    .bind(state)
    .bind(zip_code)
    .bind(country)
    .fetch_one(&mut *conn)
    .await
}
