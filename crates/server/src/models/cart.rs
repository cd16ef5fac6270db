//! Cart models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use paseo_core::{CartItemId, ProductId, UserId};

use super::ProductWithCategory;

/// One cart line: a (user, product, size) triple with a quantity.
///
/// The triple is unique per user; adding the same product and size again
/// increments the quantity instead of creating a second row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique cart item ID.
    pub id: CartItemId,
    /// Owning user.
    pub user_id: UserId,
    /// Product in the cart.
    pub product_id: ProductId,
    /// Selected size label.
    pub size: String,
    /// Requested quantity, always positive.
    pub quantity: i32,
    /// When the line was first added.
    pub created_at: DateTime<Utc>,
    /// When the quantity was last changed.
    pub updated_at: DateTime<Utc>,
}

/// A cart line with the live product (and its category) embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemWithProduct {
    #[serde(flatten)]
    pub item: CartItem,
    pub product: ProductWithCategory,
}
