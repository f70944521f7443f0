//! BTreeMap-backed implementation of the product store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use stockroom_core::{Product, ProductDraft};
use stockroom_storage::{ProductStore, StorageError};

/// In-memory product store.
///
/// Rows live in a `BTreeMap` keyed by id behind a tokio `RwLock`; ids
/// come from an atomic counter and are never reused within a process,
/// even after deletion.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rows: RwLock<BTreeMap<i64, Product>>,
    id_counter: AtomicI64,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given rows.
    ///
    /// The id counter starts above the highest seeded id so later
    /// inserts never collide.
    #[must_use]
    pub fn with_rows(rows: impl IntoIterator<Item = Product>) -> Self {
        let map: BTreeMap<i64, Product> = rows.into_iter().map(|p| (p.id, p)).collect();
        let max_id = map.keys().next_back().copied().unwrap_or(0);
        Self {
            rows: RwLock::new(map),
            id_counter: AtomicI64::new(max_id),
        }
    }

    fn next_id(&self) -> i64 {
        self.id_counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of rows currently stored.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Returns `true` if the store holds no rows.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

/// Order by name ascending, id as tiebreaker for determinism.
fn sort_by_name(products: &mut [Product]) {
    products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Product>, StorageError> {
        let rows = self.rows.read().await;
        let mut products: Vec<Product> = rows.values().cloned().collect();
        sort_by_name(&mut products);
        Ok(products)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, StorageError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn insert(&self, draft: ProductDraft) -> Result<Product, StorageError> {
        let product = draft.into_product(self.next_id(), Utc::now());
        let mut rows = self.rows.write().await;
        rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<Product, StorageError> {
        let mut rows = self.rows.write().await;
        let existing = rows
            .get_mut(&product.id)
            .ok_or(StorageError::NotFound { id: product.id })?;

        existing.name = product.name.clone();
        existing.category = product.category.clone();
        existing.price = product.price;
        existing.quantity = product.quantity;
        existing.updated_at = Some(Utc::now());

        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        let mut rows = self.rows.write().await;
        Ok(rows.remove(&id).is_some())
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, StorageError> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.list_all().await;
        }

        let rows = self.rows.read().await;
        let mut products: Vec<Product> = rows
            .values()
            .filter(|p| p.matches_term(&needle))
            .cloned()
            .collect();
        sort_by_name(&mut products);
        Ok(products)
    }
}
