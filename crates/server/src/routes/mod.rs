//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (pings the database)
//!
//! # Catalog (public)
//! GET  /products                   - Paginated product listing with filters
//! GET  /products/{id}              - Product detail
//! GET  /categories                 - Category listing
//!
//! # Cart (requires session)
//! GET    /cart                     - The caller's cart lines
//! POST   /cart                     - Add a product (folds duplicate lines)
//! PATCH  /cart                     - Set a line's quantity
//! DELETE /cart?itemId=             - Remove a line
//!
//! # Checkout & orders (requires session)
//! POST /checkout                   - Place an order from the cart
//! GET  /orders                     - The caller's orders (admin: all orders)
//!
//! # Dashboard (requires ADMIN role)
//! GET    /dashboard/products       - All products
//! POST   /dashboard/products       - Create a product
//! GET    /dashboard/products/{id}  - Product detail
//! PATCH  /dashboard/products/{id}  - Partial update
//! DELETE /dashboard/products/{id}  - Delete
//! GET    /dashboard/categories     - All categories
//! POST   /dashboard/categories     - Create a category
//! PATCH  /dashboard/orders/{id}/status - Advance or cancel an order
//! GET    /dashboard/stats          - Headline numbers
//! GET    /dashboard/analytics      - Six-month sales aggregates
//! ```

pub mod cart;
pub mod checkout;
pub mod dashboard;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the full application router (health endpoints are added in `main`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/categories", get(products::categories))
        .route(
            "/cart",
            get(cart::index)
                .post(cart::add)
                .patch(cart::update)
                .delete(cart::remove),
        )
        .route("/checkout", post(checkout::create))
        .route("/orders", get(orders::index))
        .nest("/dashboard", dashboard::routes())
}
