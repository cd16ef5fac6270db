//! Order placement workflow.
//!
//! Turns the caller's cart into an order inside a single database
//! transaction:
//!
//! 1. Load the cart lines with current product price/stock, locking the
//!    product rows (`FOR UPDATE`).
//! 2. Validate every requested quantity against stock; the first short line
//!    aborts the whole operation with the product named. No partial order.
//! 3. Find or create the shipping address (exact-field match, no
//!    normalization).
//! 4. Write the order and its frozen line snapshots, decrement stock with a
//!    guarded update, and clear the cart.
//!
//! Either everything commits or nothing does; a losing concurrent checkout
//! gets a clean stock error instead of driving stock negative.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{PgConnection, PgPool};
use thiserror::Error;

use paseo_core::{ProductId, UserId};

use crate::db;
use crate::models::Order;

/// Country used when the client omits one.
const DEFAULT_COUNTRY: &str = "España";

/// Errors from the checkout workflow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Street, city, or zip code is missing.
    #[error("shipping address is incomplete")]
    IncompleteAddress,

    /// A cart line asks for more units than the product has.
    #[error("insufficient stock for {name}")]
    InsufficientStock {
        /// Product that could not be fulfilled.
        product_id: ProductId,
        /// Its display name, for the client-facing message.
        name: String,
    },

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Shipping address fields as submitted by the client.
///
/// All fields arrive optional so that a missing field produces a proper
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressInput {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// A validated shipping address ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ValidAddress {
    street: String,
    city: String,
    state: Option<String>,
    zip_code: String,
    country: String,
}

impl ShippingAddressInput {
    /// Require street, city, and zip code; default the country.
    ///
    /// Values are deliberately not trimmed or case-folded - address
    /// de-duplication is exact-string match.
    fn validate(&self) -> Result<ValidAddress, CheckoutError> {
        let street = non_empty(self.street.as_deref()).ok_or(CheckoutError::IncompleteAddress)?;
        let city = non_empty(self.city.as_deref()).ok_or(CheckoutError::IncompleteAddress)?;
        let zip_code =
            non_empty(self.zip_code.as_deref()).ok_or(CheckoutError::IncompleteAddress)?;

        Ok(ValidAddress {
            street: street.to_owned(),
            city: city.to_owned(),
            state: self.state.as_deref().and_then(non_empty_opt).map(str::to_owned),
            zip_code: zip_code.to_owned(),
            country: non_empty(self.country.as_deref())
                .unwrap_or(DEFAULT_COUNTRY)
                .to_owned(),
        })
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn non_empty_opt(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

/// One cart line joined with the live product, as seen inside the
/// transaction.
#[derive(Debug, Clone, sqlx::FromRow)]
struct CheckoutLine {
    product_id: ProductId,
    name: String,
    size: String,
    quantity: i32,
    price: Decimal,
    stock: i32,
}

/// Place an order from the user's cart.
///
/// Returns the created order (status `PENDING`).
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`], [`CheckoutError::IncompleteAddress`],
/// or [`CheckoutError::InsufficientStock`] for validation failures - in all
/// three cases nothing is written. Returns [`CheckoutError::Database`] if the
/// transaction fails.
pub async fn place_order(
    pool: &PgPool,
    user_id: UserId,
    shipping: &ShippingAddressInput,
    payment_method: &str,
) -> Result<Order, CheckoutError> {
    let address = shipping.validate()?;

    let mut tx = pool.begin().await?;

    let lines = fetch_lines(&mut tx, user_id).await?;
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    if let Some(line) = first_insufficient(&lines) {
        return Err(CheckoutError::InsufficientStock {
            product_id: line.product_id,
            name: line.name.clone(),
        });
    }

    let total = order_total(&lines);

    let shipping_address = match db::addresses::find_exact(
        &mut tx,
        user_id,
        &address.street,
        &address.city,
        &address.zip_code,
    )
    .await?
    {
        Some(existing) => existing,
        None => {
            db::addresses::create(
                &mut tx,
                user_id,
                &address.street,
                &address.city,
                address.state.as_deref(),
                &address.zip_code,
                &address.country,
            )
            .await?
        }
    };

    let order = db::orders::insert(&mut tx, user_id, total, shipping_address.id, payment_method)
        .await?;

    for line in &lines {
        db::orders::insert_item(
            &mut tx,
            order.id,
            line.product_id,
            line.quantity,
            line.price,
            &line.size,
        )
        .await?;

        // Re-checked at write time; the row locks make this the final word.
        let decremented =
            db::products::decrement_stock(&mut tx, line.product_id, line.quantity).await?;
        if !decremented {
            return Err(CheckoutError::InsufficientStock {
                product_id: line.product_id,
                name: line.name.clone(),
            });
        }
    }

    db::cart::clear_for_user(&mut tx, user_id).await?;

    tx.commit().await?;

    tracing::info!(
        order_id = %order.id,
        user_id = %user_id,
        total = %order.total,
        "order placed"
    );

    Ok(order)
}

/// Load the user's cart lines and lock the product rows for the duration of
/// the transaction.
async fn fetch_lines(
    conn: &mut PgConnection,
    user_id: UserId,
) -> Result<Vec<CheckoutLine>, sqlx::Error> {
    sqlx::query_as::<_, CheckoutLine>(
        r"
        SELECT ci.product_id, p.name, ci.size, ci.quantity, p.price, p.stock
        FROM cart_items ci
        JOIN products p ON p.id = ci.product_id
        WHERE ci.user_id = $1
        ORDER BY ci.created_at ASC
        FOR UPDATE OF p
        ",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
}

/// First cart line whose requested quantity exceeds current stock.
fn first_insufficient(lines: &[CheckoutLine]) -> Option<&CheckoutLine> {
    lines.iter().find(|line| line.quantity > line.stock)
}

/// Sum of line price x quantity at the prices read inside the transaction.
fn order_total(lines: &[CheckoutLine]) -> Decimal {
    lines
        .iter()
        .fold(Decimal::ZERO, |acc, line| {
            acc + line.price * Decimal::from(line.quantity)
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(product_id: i64, name: &str, quantity: i32, price: &str, stock: i32) -> CheckoutLine {
        CheckoutLine {
            product_id: ProductId::new(product_id),
            name: name.to_owned(),
            size: "42".to_owned(),
            quantity,
            price: price.parse().unwrap(),
            stock,
        }
    }

    #[test]
    fn total_is_price_times_quantity() {
        let lines = vec![line(1, "Zapatillas Running Pro", 2, "10.00", 5)];
        assert_eq!(order_total(&lines), "20.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn total_sums_across_lines() {
        let lines = vec![
            line(1, "Zapatillas Running Pro", 2, "89.99", 50),
            line(2, "Botas de Cuero", 1, "149.99", 25),
        ];
        assert_eq!(order_total(&lines), "329.97".parse::<Decimal>().unwrap());
    }

    #[test]
    fn empty_cart_has_zero_total() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn insufficient_line_is_reported_by_product() {
        let lines = vec![
            line(1, "Zapatillas Running Pro", 2, "89.99", 50),
            line(2, "Botas de Cuero", 3, "149.99", 1),
        ];
        let short = first_insufficient(&lines).unwrap();
        assert_eq!(short.product_id, ProductId::new(2));
        assert_eq!(short.name, "Botas de Cuero");
    }

    #[test]
    fn exact_stock_is_sufficient() {
        let lines = vec![line(1, "Zapatillas Running Pro", 5, "89.99", 5)];
        assert!(first_insufficient(&lines).is_none());
    }

    #[test]
    fn address_requires_street_city_and_zip() {
        let missing_street = ShippingAddressInput {
            city: Some("Madrid".to_owned()),
            zip_code: Some("28001".to_owned()),
            ..ShippingAddressInput::default()
        };
        assert!(matches!(
            missing_street.validate(),
            Err(CheckoutError::IncompleteAddress)
        ));

        let empty_city = ShippingAddressInput {
            street: Some("Calle Mayor 1".to_owned()),
            city: Some(String::new()),
            zip_code: Some("28001".to_owned()),
            ..ShippingAddressInput::default()
        };
        assert!(matches!(
            empty_city.validate(),
            Err(CheckoutError::IncompleteAddress)
        ));
    }

    #[test]
    fn address_country_defaults() {
        let input = ShippingAddressInput {
            street: Some("Calle Mayor 1".to_owned()),
            city: Some("Madrid".to_owned()),
            zip_code: Some("28001".to_owned()),
            ..ShippingAddressInput::default()
        };
        let valid = input.validate().unwrap();
        assert_eq!(valid.country, DEFAULT_COUNTRY);
        assert_eq!(valid.state, None);
    }

    #[test]
    fn address_fields_are_not_normalized() {
        let input = ShippingAddressInput {
            street: Some("  Calle Mayor 1 ".to_owned()),
            city: Some("MADRID".to_owned()),
            zip_code: Some("28001".to_owned()),
            country: Some("Portugal".to_owned()),
            ..ShippingAddressInput::default()
        };
        let valid = input.validate().unwrap();
        // Whitespace and case survive; de-duplication is exact match.
        assert_eq!(valid.street, "  Calle Mayor 1 ");
        assert_eq!(valid.city, "MADRID");
        assert_eq!(valid.country, "Portugal");
    }
}
