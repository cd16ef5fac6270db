//! Order repository.
//!
//! Listing returns fully-embedded order details (user summary, shipping
//! address, item snapshots with their products). The insert functions run
//! inside the checkout transaction and take an explicit connection.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use paseo_core::{
    AddressId, CategoryId, Email, OrderId, OrderItemId, OrderStatus, ProductId, UserId,
};

use super::RepositoryError;
use crate::models::{
    Address, Category, Order, OrderDetail, OrderItem, OrderItemDetail, Product,
    ProductWithCategory, UserSummary,
};

/// Internal row type for order + user + address queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderDetailRow {
    id: OrderId,
    user_id: UserId,
    total: Decimal,
    status: OrderStatus,
    shipping_address_id: AddressId,
    payment_method: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_email: Email,
    user_name: String,
    address_street: String,
    address_city: String,
    address_state: Option<String>,
    address_zip_code: String,
    address_country: String,
    address_created_at: DateTime<Utc>,
}

impl OrderDetailRow {
    fn into_detail(self, items: Vec<OrderItemDetail>) -> OrderDetail {
        OrderDetail {
            order: Order {
                id: self.id,
                user_id: self.user_id,
                total: self.total,
                status: self.status,
                shipping_address_id: self.shipping_address_id,
                payment_method: self.payment_method,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            user: UserSummary {
                id: self.user_id,
                email: self.user_email,
                name: self.user_name,
            },
            shipping_address: Address {
                id: self.shipping_address_id,
                user_id: self.user_id,
                street: self.address_street,
                city: self.address_city,
                state: self.address_state,
                zip_code: self.address_zip_code,
                country: self.address_country,
                created_at: self.address_created_at,
            },
            items,
        }
    }
}

/// Internal row type for order item + product queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemDetailRow {
    id: OrderItemId,
    order_id: OrderId,
    product_id: ProductId,
    quantity: i32,
    price: Decimal,
    size: String,
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

impl From<OrderItemDetailRow> for OrderItemDetail {
    fn from(row: OrderItemDetailRow) -> Self {
        Self {
            item: OrderItem {
                id: row.id,
                order_id: row.order_id,
                product_id: row.product_id,
                quantity: row.quantity,
                price: row.price,
                size: row.size,
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

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders newest first, with user, shipping address, and item
    /// snapshots embedded.
    ///
    /// Passing a `user_id` restricts the listing to that user (customer
    /// view); `None` lists everything (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_detailed(
        &self,
        user_id: Option<UserId>,
    ) -> Result<Vec<OrderDetail>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderDetailRow>(
            r"
            SELECT o.id, o.user_id, o.total, o.status, o.shipping_address_id,
                   o.payment_method, o.created_at, o.updated_at,
                   u.email AS user_email, u.name AS user_name,
                   a.street AS address_street, a.city AS address_city,
                   a.state AS address_state, a.zip_code AS address_zip_code,
                   a.country AS address_country, a.created_at AS address_created_at
            FROM orders o
            JOIN users u ON u.id = o.user_id
            JOIN addresses a ON a.id = o.shipping_address_id
            WHERE $1::BIGINT IS NULL OR o.user_id = $1
            ORDER BY o.created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i64> = rows.iter().map(|r| r.id.as_i64()).collect();
        let mut items_by_order = self.items_for_orders(&order_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id.as_i64()).unwrap_or_default();
                row.into_detail(items)
            })
            .collect())
    }

    /// Get a bare order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, total, status, shipping_address_id,
                   payment_method, created_at, updated_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Move an order from `from` to `to`.
    ///
    /// The update is conditional on the current status so a concurrent
    /// transition loses cleanly instead of overwriting.
    ///
    /// Returns `false` if the order is gone or its status changed underneath
    /// the caller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_status(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET status = $3, updated_at = now()
            WHERE id = $1 AND status = $2
            ",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn items_for_orders(
        &self,
        order_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<OrderItemDetail>>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderItemDetailRow>(
            r"
            SELECT oi.id, oi.order_id, oi.product_id, oi.quantity, oi.price, oi.size,
                   p.name AS product_name, p.description AS product_description,
                   p.price AS product_price, p.images AS product_images,
                   p.stock AS product_stock, p.sizes AS product_sizes,
                   p.category_id,
                   p.created_at AS product_created_at, p.updated_at AS product_updated_at,
                   c.name AS category_name, c.slug AS category_slug,
                   c.description AS category_description, c.created_at AS category_created_at
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            JOIN categories c ON c.id = p.category_id
            WHERE oi.order_id = ANY($1)
            ORDER BY oi.id ASC
            ",
        )
        .bind(order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<OrderItemDetail>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.order_id.as_i64())
                .or_default()
                .push(row.into());
        }

        Ok(grouped)
    }
}

/// Insert the order row inside the checkout transaction.
pub(crate) async fn insert(
    conn: &mut PgConnection,
    user_id: UserId,
    total: Decimal,
    shipping_address_id: AddressId,
    payment_method: &str,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        r"
        INSERT INTO orders (user_id, total, status, shipping_address_id, payment_method)
        VALUES ($1, $2, 'PENDING', $3, $4)
        RETURNING id, user_id, total, status, shipping_address_id,
                  payment_method, created_at, updated_at
        ",
    )
    .bind(user_id)
    .bind(total)
    .bind(shipping_address_id)
    .bind(payment_method)
    .fetch_one(&mut *conn)
    .await
}

/// Insert one frozen line snapshot inside the checkout transaction.
pub(crate) async fn insert_item(
    conn: &mut PgConnection,
    order_id: OrderId,
    product_id: ProductId,
    quantity: i32,
    price: Decimal,
    size: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO order_items (order_id, product_id, quantity, price, size)
        VALUES ($1, $2, $3, $4, $5)
        ",
    )
    .bind(order_id)
    .bind(product_id)
    .bind(quantity)
    .bind(price)
    .bind(size)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
