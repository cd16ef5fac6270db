//! Product repository.
//!
//! Listing queries always join the owning category; the public catalog
//! filter is assembled dynamically with `QueryBuilder`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use paseo_core::{CategoryId, ProductId};

use super::RepositoryError;
use crate::models::{Category, Product, ProductWithCategory};

/// Columns for a product joined with its category.
pub(crate) const PRODUCT_WITH_CATEGORY_COLUMNS: &str = "\
    p.id, p.name, p.description, p.price, p.images, p.stock, p.sizes, \
    p.category_id, p.created_at, p.updated_at, \
    c.name AS category_name, c.slug AS category_slug, \
    c.description AS category_description, c.created_at AS category_created_at";

/// Internal row type for product + category queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductWithCategoryRow {
    pub(crate) id: ProductId,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) price: Decimal,
    pub(crate) images: Vec<String>,
    pub(crate) stock: i32,
    pub(crate) sizes: Vec<String>,
    pub(crate) category_id: CategoryId,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) category_name: String,
    pub(crate) category_slug: String,
    pub(crate) category_description: String,
    pub(crate) category_created_at: DateTime<Utc>,
}

impl From<ProductWithCategoryRow> for ProductWithCategory {
    fn from(row: ProductWithCategoryRow) -> Self {
        Self {
            product: Product {
                id: row.id,
                name: row.name,
                description: row.description,
                price: row.price,
                images: row.images,
                stock: row.stock,
                sizes: row.sizes,
                category_id: row.category_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            category: Category {
                id: row.category_id,
                name: row.category_name,
                slug: row.category_slug,
                description: row.category_description,
                created_at: row.category_created_at,
            },
        }
    }
}

/// Filters for the public catalog listing.
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    /// Category slug to restrict to.
    pub category: Option<String>,
    /// Case-insensitive name substring.
    pub search: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

/// Fields for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<String>,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub category_id: CategoryId,
}

/// Partial update for a product; `None` fields are left unchanged.
#[derive(Debug, Default, Clone)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub images: Option<Vec<String>>,
    pub stock: Option<i32>,
    pub sizes: Option<Vec<String>>,
    pub category_id: Option<CategoryId>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching `filter`, newest first, with the total match
    /// count for pagination.
    ///
    /// `page` is 1-based.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<ProductWithCategory>, i64), RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_WITH_CATEGORY_COLUMNS} \
             FROM products p JOIN categories c ON c.id = p.category_id"
        ));
        push_filters(&mut query, filter);
        query.push(" ORDER BY p.created_at DESC LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind((page - 1) * limit);

        let rows: Vec<ProductWithCategoryRow> =
            query.build_query_as().fetch_all(self.pool).await?;

        let mut count_query = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM products p JOIN categories c ON c.id = p.category_id",
        );
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.pool)
            .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    /// List every product, newest first (dashboard view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<ProductWithCategory>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductWithCategoryRow>(&format!(
            "SELECT {PRODUCT_WITH_CATEGORY_COLUMNS} \
             FROM products p JOIN categories c ON c.id = p.category_id \
             ORDER BY p.created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a product with its category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<ProductWithCategory>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductWithCategoryRow>(&format!(
            "SELECT {PRODUCT_WITH_CATEGORY_COLUMNS} \
             FROM products p JOIN categories c ON c.id = p.category_id \
             WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the category does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &NewProduct) -> Result<ProductWithCategory, RepositoryError> {
        let id = sqlx::query_scalar::<_, ProductId>(
            r"
            INSERT INTO products (name, description, price, images, stock, sizes, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            ",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.images)
        .bind(input.stock)
        .bind(&input.sizes)
        .bind(input.category_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict("category does not exist".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        self.get(id).await?.ok_or_else(|| {
            RepositoryError::DataCorruption(format!("product {id} missing after insert"))
        })
    }

    /// Apply a partial update to a product.
    ///
    /// Returns `None` if the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the new category does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Option<ProductWithCategory>, RepositoryError> {
        let updated = sqlx::query_scalar::<_, ProductId>(
            r"
            UPDATE products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                images = COALESCE($5, images),
                stock = COALESCE($6, stock),
                sizes = COALESCE($7, sizes),
                category_id = COALESCE($8, category_id),
                updated_at = now()
            WHERE id = $1
            RETURNING id
            ",
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.price)
        .bind(&update.images)
        .bind(update.stock)
        .bind(&update.sizes)
        .bind(update.category_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict("category does not exist".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        match updated {
            Some(id) => Ok(self.get(id).await?),
            None => Ok(None),
        }
    }

    /// Delete a product.
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product appears in order
    /// history (snapshots must stay resolvable).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict(
                        "product has order history and cannot be deleted".to_owned(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}

/// Guarded stock decrement inside the checkout transaction.
///
/// Returns `false` when the product no longer has `quantity` units, in which
/// case the caller must abort the transaction.
pub(crate) async fn decrement_stock(
    conn: &mut PgConnection,
    product_id: ProductId,
    quantity: i32,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r"
        UPDATE products
        SET stock = stock - $2, updated_at = now()
        WHERE id = $1 AND stock >= $2
        ",
    )
    .bind(product_id)
    .bind(quantity)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    query.push(" WHERE TRUE");
    if let Some(slug) = &filter.category {
        query.push(" AND c.slug = ");
        query.push_bind(slug.clone());
    }
    if let Some(term) = &filter.search {
        query.push(" AND p.name ILIKE ");
        query.push_bind(format!("%{term}%"));
    }
    if let Some(min) = filter.min_price {
        query.push(" AND p.price >= ");
        query.push_bind(min);
    }
    if let Some(max) = filter.max_price {
        query.push(" AND p.price <= ");
        query.push_bind(max);
    }
}
