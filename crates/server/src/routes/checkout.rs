//! Checkout route handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use paseo_core::OrderId;

use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::services::checkout::{self, ShippingAddressInput};
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub shipping_address: Option<ShippingAddressInput>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// Checkout response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: OrderId,
    pub message: String,
}

/// `POST /checkout` - place an order from the caller's cart.
#[instrument(skip(state, user, request), fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let payment_method = request
        .payment_method
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::Validation("payment method is required".to_owned()))?;

    let shipping = request.shipping_address.unwrap_or_default();

    let order = checkout::place_order(state.pool(), user.id, &shipping, &payment_method).await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            order_id: order.id,
            message: "order placed".to_owned(),
        }),
    ))
}
