//! Admin order status management.
//!
//! The only mutation orders support after creation: walking the status
//! state machine. Transitions are admin-driven; nothing moves on its own.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use paseo_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Order;
use crate::state::AppState;

/// Update order status request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub status: Option<OrderStatus>,
}

/// `PATCH /dashboard/orders/{id}/status` - advance or cancel an order.
///
/// Valid moves: PENDING -> PROCESSING -> SHIPPED -> DELIVERED, plus
/// CANCELLED from any non-terminal state. Anything else is 400.
#[instrument(skip(state, _admin, request))]
pub async fn update_status(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<OrderId>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>> {
    let next = request
        .status
        .ok_or_else(|| AppError::Validation("status is required".to_owned()))?;

    let repo = OrderRepository::new(state.pool());

    let order = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    if !order.status.can_transition_to(next) {
        return Err(AppError::Validation(format!(
            "cannot move order from {} to {next}",
            order.status
        )));
    }

    // Conditional on the status we just read; a concurrent transition loses.
    let updated = repo.update_status(order.id, order.status, next).await?;
    if !updated {
        return Err(AppError::Conflict(
            "order status changed concurrently".to_owned(),
        ));
    }

    let order = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    tracing::info!(order_id = %order.id, status = %order.status, "order status updated");

    Ok(Json(order))
}
