//! Cart route handlers.
//!
//! All cart operations act on the authenticated caller's own lines;
//! another user's cart item simply does not exist from their point of view.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use paseo_core::{CartItemId, ProductId};

use crate::db::{CartRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::CartItemWithProduct;
use crate::state::AppState;

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub size: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

const fn default_quantity() -> i32 {
    1
}

/// Update cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub item_id: CartItemId,
    pub quantity: i32,
}

/// Remove from cart query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCartQuery {
    pub item_id: CartItemId,
}

/// `GET /cart` - the caller's cart, newest line first.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<CartItemWithProduct>>> {
    let items = CartRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(items))
}

/// `POST /cart` - add a product to the cart.
///
/// Adding the same (product, size) again increments the existing line's
/// quantity instead of creating a duplicate row.
#[instrument(skip(state, user, request), fields(user_id = %user.id))]
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartItemWithProduct>> {
    if request.quantity < 1 {
        return Err(AppError::Validation("quantity must be positive".to_owned()));
    }
    if request.size.is_empty() {
        return Err(AppError::Validation("size is required".to_owned()));
    }

    let product = ProductRepository::new(state.pool())
        .get(request.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    if product.product.stock < request.quantity {
        return Err(AppError::Validation(format!(
            "insufficient stock for {}",
            product.product.name
        )));
    }

    let cart = CartRepository::new(state.pool());
    let item_id = cart
        .upsert_line(user.id, request.product_id, &request.size, request.quantity)
        .await?;

    let item = cart
        .get_for_user(item_id, user.id)
        .await?
        .ok_or_else(|| AppError::Internal("cart line vanished after upsert".to_owned()))?;

    Ok(Json(item))
}

/// `PATCH /cart` - set a line's quantity.
#[instrument(skip(state, user, request), fields(user_id = %user.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartItemWithProduct>> {
    if request.quantity < 1 {
        return Err(AppError::Validation("quantity must be positive".to_owned()));
    }

    let cart = CartRepository::new(state.pool());

    let existing = cart
        .get_for_user(request.item_id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("cart item {}", request.item_id)))?;

    if existing.product.product.stock < request.quantity {
        return Err(AppError::Validation(format!(
            "insufficient stock for {}",
            existing.product.product.name
        )));
    }

    cart.update_quantity(request.item_id, user.id, request.quantity)
        .await?;

    let item = cart
        .get_for_user(request.item_id, user.id)
        .await?
        .ok_or_else(|| AppError::Internal("cart line vanished after update".to_owned()))?;

    Ok(Json(item))
}

/// `DELETE /cart?itemId=` - remove a line.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<RemoveCartQuery>,
) -> Result<StatusCode> {
    let deleted = CartRepository::new(state.pool())
        .delete(query.item_id, user.id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("cart item {}", query.item_id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
