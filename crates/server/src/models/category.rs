//! Category model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use paseo_core::CategoryId;

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL slug, unique across categories.
    pub slug: String,
    /// Free-text description.
    pub description: String,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
}
