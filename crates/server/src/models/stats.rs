//! Dashboard statistics and analytics models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use paseo_core::Email;

use super::{Order, ProductWithCategory};

/// Headline numbers for the dashboard landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_orders: i64,
    /// Revenue across all non-cancelled orders.
    pub total_revenue: Decimal,
    /// Customer accounts (role USER).
    pub total_users: i64,
    /// The five most recent orders.
    pub recent_orders: Vec<RecentOrder>,
    /// The five best-selling products by units sold.
    pub top_products: Vec<TopProduct>,
}

/// An order with a minimal customer summary, for the recent-orders list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    #[serde(flatten)]
    pub order: Order,
    pub user: OrderCustomer,
}

/// Customer name and email shown next to a recent order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    pub name: String,
    pub email: Email,
}

/// A best-selling product with its lifetime units sold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product: ProductWithCategory,
    pub total_sold: i64,
}

/// Six-month sales aggregates for the analytics page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub sales_by_month: Vec<MonthlySales>,
    pub sales_by_category: Vec<CategorySales>,
    pub top_products: Vec<ProductSales>,
}

/// Revenue for one `YYYY-MM` month.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    pub month: String,
    pub sales: Decimal,
}

/// Revenue attributed to one category.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    pub category: String,
    pub sales: Decimal,
}

/// Units sold for one product.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub name: String,
    pub sales: i64,
}
