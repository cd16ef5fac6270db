//! Order, order item, and address models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use paseo_core::{AddressId, OrderId, OrderItemId, OrderStatus, ProductId, UserId};

use super::{ProductWithCategory, UserSummary};

/// A shipping address.
///
/// Addresses are de-duplicated per user by exact (street, city, zip) match
/// at checkout time; the comparison is a plain string equality with no
/// normalization.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Unique address ID.
    pub id: AddressId,
    /// Owning user.
    pub user_id: UserId,
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub zip_code: String,
    pub country: String,
    /// When the address was first saved.
    pub created_at: DateTime<Utc>,
}

/// An order.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Sum of line price x quantity captured at purchase time.
    pub total: Decimal,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Shipping address reference.
    pub shipping_address_id: AddressId,
    /// Payment method label submitted at checkout.
    pub payment_method: String,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the status was last changed.
    pub updated_at: DateTime<Utc>,
}

/// An immutable snapshot of one purchased line.
///
/// Price, quantity, and size are frozen at purchase time so historical
/// orders stay accurate when the live product changes later.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Unique order item ID.
    pub id: OrderItemId,
    /// Owning order.
    pub order_id: OrderId,
    /// Purchased product.
    pub product_id: ProductId,
    /// Purchased quantity.
    pub quantity: i32,
    /// Unit price at purchase time.
    pub price: Decimal,
    /// Purchased size label.
    pub size: String,
}

/// An order item with the live product embedded for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product: ProductWithCategory,
}

/// An order with user, shipping address, and item snapshots embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub user: UserSummary,
    pub shipping_address: Address,
    pub items: Vec<OrderItemDetail>,
}
