//! Public catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use paseo_core::ProductId;

use crate::db::{CategoryRepository, ProductRepository, products::ProductFilter};
use crate::error::{AppError, Result};
use crate::models::{Category, ProductWithCategory};
use crate::state::AppState;

/// Default page size for the catalog listing.
const DEFAULT_PAGE_SIZE: i64 = 12;

/// Upper bound for client-requested page sizes.
const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    /// 1-based page number.
    pub page: Option<i64>,
    /// Page size (clamped to 1..=100).
    pub limit: Option<i64>,
    /// Category slug to restrict to.
    pub category: Option<String>,
    /// Case-insensitive name substring.
    pub search: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

/// Paginated product listing response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductWithCategory>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

/// `GET /products` - paginated catalog listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    let filter = ProductFilter {
        category: query.category.filter(|c| !c.is_empty() && c != "all"),
        search: query.search.filter(|s| !s.is_empty()),
        min_price: query.min_price,
        max_price: query.max_price,
    };

    let (products, total) = ProductRepository::new(state.pool())
        .list(&filter, page, limit)
        .await?;

    Ok(Json(ProductListResponse {
        products,
        total,
        page,
        total_pages: (total as u64).div_ceil(limit as u64) as i64,
    }))
}

/// `GET /products/{id}` - product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductWithCategory>> {
    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// `GET /categories` - all categories.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}
