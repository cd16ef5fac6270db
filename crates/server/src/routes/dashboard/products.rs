//! Admin product management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use paseo_core::{CategoryId, ProductId};

use crate::db::{
    CategoryRepository, ProductRepository,
    products::{NewProduct, ProductUpdate},
};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::ProductWithCategory;
use crate::state::AppState;

/// Create product request body. Name, price, and category are required;
/// everything else defaults to empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub images: Option<Vec<String>>,
    pub stock: Option<i32>,
    pub sizes: Option<Vec<String>>,
    pub category_id: Option<CategoryId>,
}

/// Partial product update request body; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub images: Option<Vec<String>>,
    pub stock: Option<i32>,
    pub sizes: Option<Vec<String>>,
    pub category_id: Option<CategoryId>,
}

/// `GET /dashboard/products` - every product, newest first.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<ProductWithCategory>>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(products))
}

/// `GET /dashboard/products/{id}` - product detail.
#[instrument(skip(state, _admin))]
pub async fn show(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductWithCategory>> {
    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// `POST /dashboard/products` - create a product.
#[instrument(skip(state, _admin, request))]
pub async fn create(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductWithCategory>)> {
    let name = request
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| required("name"))?;
    let price = request.price.ok_or_else(|| required("price"))?;
    let category_id = request.category_id.ok_or_else(|| required("categoryId"))?;

    let stock = request.stock.unwrap_or(0);
    if stock < 0 {
        return Err(AppError::Validation("stock cannot be negative".to_owned()));
    }

    if !CategoryRepository::new(state.pool()).exists(category_id).await? {
        return Err(AppError::Validation(format!(
            "category {category_id} does not exist"
        )));
    }

    let input = NewProduct {
        name,
        description: request.description.unwrap_or_default(),
        price,
        images: request.images.unwrap_or_default(),
        stock,
        sizes: request.sizes.unwrap_or_default(),
        category_id,
    };

    let product = ProductRepository::new(state.pool()).create(&input).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// `PATCH /dashboard/products/{id}` - partial update.
///
/// Stock is an absolute set here; checkout is the only place that
/// decrements.
#[instrument(skip(state, _admin, request))]
pub async fn update(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<ProductId>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ProductWithCategory>> {
    if let Some(stock) = request.stock
        && stock < 0
    {
        return Err(AppError::Validation("stock cannot be negative".to_owned()));
    }

    let update = ProductUpdate {
        name: request.name,
        description: request.description,
        price: request.price,
        images: request.images,
        stock: request.stock,
        sizes: request.sizes,
        category_id: request.category_id,
    };

    ProductRepository::new(state.pool())
        .update(id, &update)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// `DELETE /dashboard/products/{id}` - delete a product.
///
/// Products referenced by order history cannot be deleted (409).
#[instrument(skip(state, _admin))]
pub async fn destroy(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    let deleted = ProductRepository::new(state.pool()).delete(id).await?;

    if !deleted {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn required(field: &str) -> AppError {
    AppError::Validation(format!("{field} is required"))
}
