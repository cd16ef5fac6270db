//! Dashboard statistics and analytics handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::StatsRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{AnalyticsReport, DashboardStats};
use crate::state::AppState;

/// `GET /dashboard/stats` - headline numbers, recent orders, best sellers.
#[instrument(skip(state, _admin))]
pub async fn dashboard(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<DashboardStats>> {
    let stats = StatsRepository::new(state.pool()).dashboard().await?;
    Ok(Json(stats))
}

/// `GET /dashboard/analytics` - six months of sales aggregates.
#[instrument(skip(state, _admin))]
pub async fn analytics(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<AnalyticsReport>> {
    let report = StatsRepository::new(state.pool()).analytics().await?;
    Ok(Json(report))
}
