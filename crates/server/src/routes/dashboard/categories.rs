//! Admin category management.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::db::CategoryRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Category;
use crate::state::AppState;

/// Create category request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// `GET /dashboard/categories` - every category.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}

/// `POST /dashboard/categories` - create a category.
///
/// Slugs are unique; a duplicate gets 409.
#[instrument(skip(state, _admin, request))]
pub async fn create(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    let name = request
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("name is required".to_owned()))?;
    let slug = request
        .slug
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("slug is required".to_owned()))?;

    let category = CategoryRepository::new(state.pool())
        .create(&name, &slug, request.description.as_deref().unwrap_or(""))
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}
