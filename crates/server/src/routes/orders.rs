//! Order listing route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::OrderRepository;
use crate::error::Result;
use crate::middleware::RequireUser;
use crate::models::OrderDetail;
use crate::state::AppState;

/// `GET /orders` - order history, newest first.
///
/// Customers see their own orders; admins see everyone's.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<OrderDetail>>> {
    let scope = if user.role.is_admin() {
        None
    } else {
        Some(user.id)
    };

    let orders = OrderRepository::new(state.pool())
        .list_detailed(scope)
        .await?;

    Ok(Json(orders))
}
