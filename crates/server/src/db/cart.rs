//! Cart repository.
//!
//! Cart lines are keyed by the (user, product, size) triple; adding the
//! same triple again folds into the existing row via upsert.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use paseo_core::{CartItemId, CategoryId, ProductId, UserId};

use super::RepositoryError;
use crate::models::{CartItem, CartItemWithProduct, Category, Product, ProductWithCategory};

/// Columns for a cart line joined with its product and category.
const CART_LINE_COLUMNS: &str = "\
    ci.id, ci.user_id, ci.product_id, ci.size, ci.quantity, ci.created_at, ci.updated_at, \
    p.name AS product_name, p.description AS product_description, \
    p.price AS product_price, p.images AS product_images, p.stock AS product_stock, \
    p.sizes AS product_sizes, p.category_id, \
    p.created_at AS product_created_at, p.updated_at AS product_updated_at, \
    c.name AS category_name, c.slug AS category_slug, \
    c.description AS category_description, c.created_at AS category_created_at";

/// Internal row type for cart line queries.
#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    id: CartItemId,
    user_id: UserId,
    product_id: ProductId,
    size: String,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    product_name: String,
    product_description: String,
    product_price: Decimal,
    product_images: Vec<String>,
    product_stock: i32,
    product_sizes: Vec<String>,
    category_id: CategoryId,
    product_created_at: DateTime<Utc>,
    product_updated_at: DateTime<Utc>,
    category_name: String,
    category_slug: String,
    category_description: String,
    category_created_at: DateTime<Utc>,
}

impl From<CartLineRow> for CartItemWithProduct {
    fn from(row: CartLineRow) -> Self {
        Self {
            item: CartItem {
                id: row.id,
                user_id: row.user_id,
                product_id: row.product_id,
                size: row.size,
                quantity: row.quantity,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            product: ProductWithCategory {
                product: Product {
                    id: row.product_id,
                    name: row.product_name,
                    description: row.product_description,
                    price: row.product_price,
                    images: row.product_images,
                    stock: row.product_stock,
                    sizes: row.product_sizes,
                    category_id: row.category_id,
                    created_at: row.product_created_at,
                    updated_at: row.product_updated_at,
                },
                category: Category {
                    id: row.category_id,
                    name: row.category_name,
                    slug: row.category_slug,
                    description: row.category_description,
                    created_at: row.category_created_at,
                },
            },
        }
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's cart lines, newest first, with product and category
    /// snapshots embedded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CartItemWithProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(&format!(
            "SELECT {CART_LINE_COLUMNS} \
             FROM cart_items ci \
             JOIN products p ON p.id = ci.product_id \
             JOIN categories c ON c.id = p.category_id \
             WHERE ci.user_id = $1 \
             ORDER BY ci.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get one of the user's cart lines by ID.
    ///
    /// Ownership is part of the lookup: another user's line is simply not
    /// found.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        item_id: CartItemId,
        user_id: UserId,
    ) -> Result<Option<CartItemWithProduct>, RepositoryError> {
        let row = sqlx::query_as::<_, CartLineRow>(&format!(
            "SELECT {CART_LINE_COLUMNS} \
             FROM cart_items ci \
             JOIN products p ON p.id = ci.product_id \
             JOIN categories c ON c.id = p.category_id \
             WHERE ci.id = $1 AND ci.user_id = $2"
        ))
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Add a product to the cart, folding into an existing (product, size)
    /// line if one exists.
    ///
    /// Returns the ID of the inserted or updated line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert_line(
        &self,
        user_id: UserId,
        product_id: ProductId,
        size: &str,
        quantity: i32,
    ) -> Result<CartItemId, RepositoryError> {
        let id = sqlx::query_scalar::<_, CartItemId>(
            r"
            INSERT INTO cart_items (user_id, product_id, size, quantity)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, product_id, size)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity,
                          updated_at = now()
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(size)
        .bind(quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Set the quantity of one of the user's cart lines.
    ///
    /// Returns `false` if the line does not exist (or belongs to someone
    /// else).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_quantity(
        &self,
        item_id: CartItemId,
        user_id: UserId,
        quantity: i32,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE cart_items
            SET quantity = $3, updated_at = now()
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(item_id)
        .bind(user_id)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove one of the user's cart lines.
    ///
    /// Returns `true` if a line was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(
        &self,
        item_id: CartItemId,
        user_id: UserId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(item_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Delete all of a user's cart lines inside the checkout transaction.
pub(crate) async fn clear_for_user(
    conn: &mut PgConnection,
    user_id: UserId,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}
