//! Dashboard statistics and analytics queries.
//!
//! Aggregations run in SQL; this module only reshapes rows. The analytics
//! window is the last six months of non-cancelled orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use paseo_core::{
    AddressId, CategoryId, Email, OrderId, OrderStatus, ProductId, UserId,
};

use super::RepositoryError;
use super::products::PRODUCT_WITH_CATEGORY_COLUMNS;
use crate::models::{
    AnalyticsReport, Category, CategorySales, DashboardStats, MonthlySales, Order, OrderCustomer,
    Product, ProductSales, ProductWithCategory, RecentOrder, TopProduct,
};

/// Internal row type for recent orders with customer info.
#[derive(Debug, sqlx::FromRow)]
struct RecentOrderRow {
    id: OrderId,
    user_id: UserId,
    total: Decimal,
    status: OrderStatus,
    shipping_address_id: AddressId,
    payment_method: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_name: String,
    user_email: Email,
}

impl From<RecentOrderRow> for RecentOrder {
    fn from(row: RecentOrderRow) -> Self {
        Self {
            order: Order {
                id: row.id,
                user_id: row.user_id,
                total: row.total,
                status: row.status,
                shipping_address_id: row.shipping_address_id,
                payment_method: row.payment_method,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            user: OrderCustomer {
                name: row.user_name,
                email: row.user_email,
            },
        }
    }
}

/// Internal row type for best sellers.
#[derive(Debug, sqlx::FromRow)]
struct TopProductRow {
    id: ProductId,
    name: String,
    description: String,
    price: Decimal,
    images: Vec<String>,
    stock: i32,
    sizes: Vec<String>,
    category_id: CategoryId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_name: String,
    category_slug: String,
    category_description: String,
    category_created_at: DateTime<Utc>,
    total_sold: i64,
}

impl From<TopProductRow> for TopProduct {
    fn from(row: TopProductRow) -> Self {
        Self {
            product: ProductWithCategory {
                product: Product {
                    id: row.id,
                    name: row.name,
                    description: row.description,
                    price: row.price,
                    images: row.images,
                    stock: row.stock,
                    sizes: row.sizes,
                    category_id: row.category_id,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                },
                category: Category {
                    id: row.category_id,
                    name: row.category_name,
                    slug: row.category_slug,
                    description: row.category_description,
                    created_at: row.category_created_at,
                },
            },
            total_sold: row.total_sold,
        }
    }
}

/// Repository for dashboard statistics queries.
pub struct StatsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StatsRepository<'a> {
    /// Create a new stats repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Headline dashboard numbers plus recent orders and best sellers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn dashboard(&self) -> Result<DashboardStats, RepositoryError> {
        let total_products =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
                .fetch_one(self.pool)
                .await?;

        let total_orders = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await?;

        let total_revenue = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(total), 0) FROM orders WHERE status <> 'CANCELLED'",
        )
        .fetch_one(self.pool)
        .await?;

        let total_users =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = 'USER'")
                .fetch_one(self.pool)
                .await?;

        let recent_rows = sqlx::query_as::<_, RecentOrderRow>(
            r"
            SELECT o.id, o.user_id, o.total, o.status, o.shipping_address_id,
                   o.payment_method, o.created_at, o.updated_at,
                   u.name AS user_name, u.email AS user_email
            FROM orders o
            JOIN users u ON u.id = o.user_id
            ORDER BY o.created_at DESC
            LIMIT 5
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let top_rows = sqlx::query_as::<_, TopProductRow>(&format!(
            "SELECT {PRODUCT_WITH_CATEGORY_COLUMNS}, s.total_sold \
             FROM (SELECT product_id, SUM(quantity)::BIGINT AS total_sold \
                   FROM order_items \
                   GROUP BY product_id \
                   ORDER BY total_sold DESC \
                   LIMIT 5) s \
             JOIN products p ON p.id = s.product_id \
             JOIN categories c ON c.id = p.category_id \
             ORDER BY s.total_sold DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(DashboardStats {
            total_products,
            total_orders,
            total_revenue,
            total_users,
            recent_orders: recent_rows.into_iter().map(Into::into).collect(),
            top_products: top_rows.into_iter().map(Into::into).collect(),
        })
    }

    /// Six-month sales aggregates: revenue per month, revenue per category,
    /// and the ten best-selling products by units.
    ///
    /// Cancelled orders are excluded throughout.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn analytics(&self) -> Result<AnalyticsReport, RepositoryError> {
        let sales_by_month = sqlx::query_as::<_, MonthlySales>(
            r"
            SELECT to_char(created_at, 'YYYY-MM') AS month, SUM(total) AS sales
            FROM orders
            WHERE status <> 'CANCELLED'
              AND created_at >= now() - INTERVAL '6 months'
            GROUP BY 1
            ORDER BY 1 ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let sales_by_category = sqlx::query_as::<_, CategorySales>(
            r"
            SELECT c.name AS category, SUM(oi.price * oi.quantity) AS sales
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            JOIN products p ON p.id = oi.product_id
            JOIN categories c ON c.id = p.category_id
            WHERE o.status <> 'CANCELLED'
              AND o.created_at >= now() - INTERVAL '6 months'
            GROUP BY c.name
            ORDER BY sales DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let top_products = sqlx::query_as::<_, ProductSales>(
            r"
            SELECT p.name, SUM(oi.quantity)::BIGINT AS sales
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            JOIN products p ON p.id = oi.product_id
            WHERE o.status <> 'CANCELLED'
              AND o.created_at >= now() - INTERVAL '6 months'
            GROUP BY p.name
            ORDER BY sales DESC
            LIMIT 10
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(AnalyticsReport {
            sales_by_month,
            sales_by_category,
            top_products,
        })
    }
}
