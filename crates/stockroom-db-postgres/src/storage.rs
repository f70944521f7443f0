//! PostgreSQL implementation of the product store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use sqlx_postgres::PgPool;
use tracing::debug;

use stockroom_core::{Product, ProductDraft};
use stockroom_storage::{ProductStore, StorageError};

use crate::config::PostgresConfig;
use crate::error::query_error;
use crate::{migrations, pool};

/// Columns selected for every product query, in `ProductRow` order.
const PRODUCT_COLUMNS: &str = "id, name, category, price, quantity, created_at, updated_at";

type ProductRow = (
    i64,
    String,
    String,
    Decimal,
    i32,
    DateTime<Utc>,
    Option<DateTime<Utc>>,
);

fn row_to_product(row: ProductRow) -> Product {
    let (id, name, category, price, quantity, created_at, updated_at) = row;
    Product {
        id,
        name,
        category,
        price,
        quantity,
        created_at,
        updated_at,
    }
}

/// PostgreSQL product store.
///
/// All identity and timestamp assignment happens here: ids come from
/// the `products` sequence, `created_at` is bound at insert time and
/// `updated_at` on every update.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new `PostgresStore` from configuration.
    ///
    /// Builds the connection pool and, if configured, runs the embedded
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created or migrations fail.
    pub async fn new(config: &PostgresConfig) -> Result<Self, StorageError> {
        let pool = pool::create_pool(config).await?;

        if config.run_migrations {
            migrations::run(&pool).await?;
        }

        Ok(Self { pool })
    }

    /// Creates a store from an existing connection pool.
    ///
    /// Migrations are not run by this constructor.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for PostgresStore {
    async fn list_all(&self) -> Result<Vec<Product>, StorageError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name ASC, id ASC");

        let rows: Vec<ProductRow> = query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to list products", e))?;

        Ok(rows.into_iter().map(row_to_product).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, StorageError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");

        let row: Option<ProductRow> = query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to read product", e))?;

        Ok(row.map(row_to_product))
    }

    async fn insert(&self, draft: ProductDraft) -> Result<Product, StorageError> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO products (name, category, price, quantity, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PRODUCT_COLUMNS}"
        );

        let row: ProductRow = query_as(&sql)
            .bind(&draft.name)
            .bind(&draft.category)
            .bind(draft.price)
            .bind(draft.quantity)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to insert product", e))?;

        let product = row_to_product(row);
        debug!(id = product.id, "product inserted");
        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<Product, StorageError> {
        let now = Utc::now();
        let sql = format!(
            "UPDATE products
             SET name = $1, category = $2, price = $3, quantity = $4, updated_at = $5
             WHERE id = $6
             RETURNING {PRODUCT_COLUMNS}"
        );

        let row: Option<ProductRow> = query_as(&sql)
            .bind(&product.name)
            .bind(&product.category)
            .bind(product.price)
            .bind(product.quantity)
            .bind(now)
            .bind(product.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to update product", e))?;

        match row {
            Some(row) => Ok(row_to_product(row)),
            None => Err(StorageError::not_found(product.id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        let result = query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete product", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, StorageError> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.list_all().await;
        }

        // position() gives plain substring semantics with no LIKE
        // wildcard escaping; numeric columns are matched on their text
        // rendering, mirroring the in-memory backend.
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE position($1 in lower(name)) > 0
                OR position($1 in lower(category)) > 0
                OR position($1 in price::text) > 0
                OR position($1 in quantity::text) > 0
                OR position($1 in id::text) > 0
             ORDER BY name ASC, id ASC"
        );

        let rows: Vec<ProductRow> = query_as(&sql)
            .bind(&needle)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to search products", e))?;

        Ok(rows.into_iter().map(row_to_product).collect())
    }
}
