//! The product store trait all storage backends implement.

use async_trait::async_trait;

use stockroom_core::{Product, ProductDraft};

use crate::error::StorageError;

/// Durable product table contract.
///
/// The store is the sole source of truth for product rows: it owns
/// identity assignment and both timestamps. Implementations must be
/// thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// use stockroom_storage::{ProductStore, StorageError};
///
/// async fn require(store: &dyn ProductStore, id: i64) -> Result<stockroom_core::Product, StorageError> {
///     store
///         .get_by_id(id)
///         .await?
///         .ok_or(StorageError::not_found(id))
/// }
/// ```
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Returns every product, ordered by `name` ascending.
    ///
    /// Full scan, no pagination.
    async fn list_all(&self) -> Result<Vec<Product>, StorageError>;

    /// Point lookup by id. Returns `None` for a missing row.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, never for a
    /// missing product.
    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, StorageError>;

    /// Inserts a new product.
    ///
    /// The store assigns `id` and `created_at` (UTC now); any notion of
    /// identity held by the caller is ignored. Returns the stored row.
    async fn insert(&self, draft: ProductDraft) -> Result<Product, StorageError>;

    /// Overwrites an existing product wholesale.
    ///
    /// `name`, `category`, `price` and `quantity` are replaced,
    /// `updated_at` is set to UTC now, `id` and `created_at` are
    /// immutable. Returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no row has `product.id`.
    async fn update(&self, product: &Product) -> Result<Product, StorageError>;

    /// Hard-deletes a product by id.
    ///
    /// Returns `true` if a row existed and was removed, `false` if no
    /// such row existed. A missing row is not an error.
    async fn delete(&self, id: i64) -> Result<bool, StorageError>;

    /// Substring search across name, category, price, quantity and id.
    ///
    /// An empty or whitespace-only term behaves exactly as
    /// [`list_all`](Self::list_all). Matching is case-insensitive and
    /// textual: numeric fields are compared via their text rendering,
    /// not numerically. Results are ordered by `name` ascending.
    async fn search(&self, term: &str) -> Result<Vec<Product>, StorageError>;
}
