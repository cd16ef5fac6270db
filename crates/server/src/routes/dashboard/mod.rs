//! Admin dashboard route handlers.
//!
//! Every handler here takes [`RequireAdmin`](crate::middleware::RequireAdmin);
//! a valid session without the ADMIN role gets 403.

pub mod categories;
pub mod orders;
pub mod products;
pub mod stats;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

/// Build the `/dashboard` router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(products::index).post(products::create),
        )
        .route(
            "/products/{id}",
            get(products::show)
                .patch(products::update)
                .delete(products::destroy),
        )
        .route(
            "/categories",
            get(categories::index).post(categories::create),
        )
        .route("/orders/{id}/status", patch(orders::update_status))
        .route("/stats", get(stats::dashboard))
        .route("/analytics", get(stats::analytics))
}
