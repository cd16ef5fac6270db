//! Domain models.
//!
//! These structs are the JSON shapes the API serves; repositories map
//! database rows into them. All serialize with camelCase field names.

pub mod cart;
pub mod category;
pub mod order;
pub mod product;
pub mod stats;
pub mod user;

pub use cart::{CartItem, CartItemWithProduct};
pub use category::Category;
pub use order::{Address, Order, OrderDetail, OrderItem, OrderItemDetail};
pub use product::{Product, ProductWithCategory};
pub use stats::{
    AnalyticsReport, CategorySales, DashboardStats, MonthlySales, OrderCustomer, ProductSales,
    RecentOrder, TopProduct,
};
pub use user::{CurrentUser, User, UserSummary};
