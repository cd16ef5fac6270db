//! Product models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use paseo_core::{CategoryId, ProductId};

use super::Category;

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Current unit price.
    pub price: Decimal,
    /// Ordered image references.
    pub images: Vec<String>,
    /// Units in stock. Never negative; decremented only by checkout,
    /// set absolutely by admin edits.
    pub stock: i32,
    /// Available size labels.
    pub sizes: Vec<String>,
    /// Owning category.
    pub category_id: CategoryId,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A product with its category embedded, as served by listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category: Category,
}
