//! The inventory service orchestrator.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use stockroom_cache::JsonCache;
use stockroom_core::{Product, ProductDraft};
use stockroom_storage::{ProductStore, StorageError};

use crate::keys::CacheKeys;

/// Cache behavior injected at construction: key names and entry TTL.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    pub keys: CacheKeys,
    pub ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            keys: CacheKeys::default(),
            ttl: Duration::from_secs(600),
        }
    }
}

/// Cache-aside orchestrator over the product store and cache gateway.
///
/// Stateless between calls: all state lives in the injected store and
/// cache. Concurrent requests are not coordinated. Two simultaneous
/// misses for the same key may both read the store and both populate
/// the cache, which is harmless since last-writer-wins on equivalent
/// values.
pub struct InventoryService {
    store: Arc<dyn ProductStore>,
    cache: JsonCache,
    policy: CachePolicy,
}

impl InventoryService {
    /// Creates a service with the default cache policy
    /// (`products:all` / `products:{id}`, 10 minute TTL).
    pub fn new(store: Arc<dyn ProductStore>, cache: JsonCache) -> Self {
        Self::with_policy(store, cache, CachePolicy::default())
    }

    /// Creates a service with an explicit cache policy.
    pub fn with_policy(store: Arc<dyn ProductStore>, cache: JsonCache, policy: CachePolicy) -> Self {
        Self {
            store,
            cache,
            policy,
        }
    }

    /// Returns the full product listing, cache first.
    ///
    /// A cached non-empty listing is returned as-is without consulting
    /// the store; staleness is bounded by the TTL, not by write
    /// recency. An empty listing is never cached, so an empty store is
    /// re-queried on every call rather than masking a later insert.
    pub async fn get_all_products(&self) -> Result<Vec<Product>, StorageError> {
        let key = self.policy.keys.listing();

        if let Some(cached) = self.cache.get_json::<Vec<Product>>(key).await
            && !cached.is_empty()
        {
            debug!(key, count = cached.len(), "listing served from cache");
            return Ok(cached);
        }

        let products = self.store.list_all().await?;
        if !products.is_empty() {
            self.cache
                .set_json(key, &products, Some(self.policy.ttl))
                .await;
        }
        debug!(key, count = products.len(), "listing served from store");
        Ok(products)
    }

    /// Returns a single product, cache first. Absence is never cached.
    pub async fn get_product_by_id(&self, id: i64) -> Result<Option<Product>, StorageError> {
        let key = self.policy.keys.item(id);

        if let Some(cached) = self.cache.get_json::<Product>(&key).await {
            debug!(key = %key, "product served from cache");
            return Ok(Some(cached));
        }

        let product = self.store.get_by_id(id).await?;
        if let Some(ref product) = product {
            self.cache
                .set_json(&key, product, Some(self.policy.ttl))
                .await;
        }
        Ok(product)
    }

    /// Inserts a new product, then invalidates the listing entry.
    ///
    /// The per-id entry is not populated proactively; the next read
    /// does that. If the store insert fails, nothing is invalidated.
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, StorageError> {
        let created = self.store.insert(draft).await?;

        self.cache.remove(self.policy.keys.listing()).await;

        debug!(id = created.id, "product created");
        Ok(created)
    }

    /// Updates a product wholesale, then invalidates the listing entry
    /// and the product's per-id entry.
    ///
    /// # Errors
    ///
    /// Propagates `StorageError::NotFound` from the store; no cache
    /// invalidation happens in that case.
    pub async fn update_product(&self, product: &Product) -> Result<Product, StorageError> {
        let updated = self.store.update(product).await?;

        self.cache.remove(self.policy.keys.listing()).await;
        self.cache.remove(&self.policy.keys.item(updated.id)).await;

        debug!(id = updated.id, "product updated");
        Ok(updated)
    }

    /// Deletes a product by id, returning whether a row was removed.
    ///
    /// Cache entries are invalidated only when the delete actually
    /// removed a row; deleting an absent id touches nothing.
    pub async fn delete_product(&self, id: i64) -> Result<bool, StorageError> {
        let deleted = self.store.delete(id).await?;

        if deleted {
            self.cache.remove(self.policy.keys.listing()).await;
            self.cache.remove(&self.policy.keys.item(id)).await;
            debug!(id, "product deleted");
        }

        Ok(deleted)
    }

    /// Substring search, always against the current store state.
    ///
    /// The cache is bypassed in both directions: search results are a
    /// function of an unbounded term space and are not worth caching.
    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, StorageError> {
        self.store.search(term).await
    }

    /// Administrative escape hatch: drops the listing entry.
    ///
    /// Per-id entries are left to expire on their own TTL.
    pub async fn clear_cache(&self) {
        self.cache.remove(self.policy.keys.listing()).await;
        debug!("listing cache cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use stockroom_cache::CacheBackend;
    use stockroom_db_memory::InMemoryStore;

    /// Store wrapper that counts calls so tests can assert whether the
    /// cache or the store served a read.
    struct RecordingStore {
        inner: InMemoryStore,
        list_calls: AtomicUsize,
        get_calls: AtomicUsize,
        search_calls: AtomicUsize,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                inner: InMemoryStore::new(),
                list_calls: AtomicUsize::new(0),
                get_calls: AtomicUsize::new(0),
                search_calls: AtomicUsize::new(0),
            }
        }

        fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        fn get_calls(&self) -> usize {
            self.get_calls.load(Ordering::SeqCst)
        }

        fn search_calls(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProductStore for RecordingStore {
        async fn list_all(&self) -> Result<Vec<Product>, StorageError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.list_all().await
        }

        async fn get_by_id(&self, id: i64) -> Result<Option<Product>, StorageError> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get_by_id(id).await
        }

        async fn insert(&self, draft: ProductDraft) -> Result<Product, StorageError> {
            self.inner.insert(draft).await
        }

        async fn update(&self, product: &Product) -> Result<Product, StorageError> {
            self.inner.update(product).await
        }

        async fn delete(&self, id: i64) -> Result<bool, StorageError> {
            self.inner.delete(id).await
        }

        async fn search(&self, term: &str) -> Result<Vec<Product>, StorageError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.search(term).await
        }
    }

    struct Fixture {
        store: Arc<RecordingStore>,
        backend: CacheBackend,
        service: InventoryService,
    }

    fn fixture() -> Fixture {
        fixture_with_policy(CachePolicy::default())
    }

    fn fixture_with_policy(policy: CachePolicy) -> Fixture {
        let store = Arc::new(RecordingStore::new());
        let backend = CacheBackend::new_local();
        let service = InventoryService::with_policy(
            store.clone(),
            JsonCache::new(backend.clone()),
            policy,
        );
        Fixture {
            store,
            backend,
            service,
        }
    }

    fn draft(name: &str, category: &str, price: rust_decimal::Decimal, qty: i32) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            category: category.into(),
            price,
            quantity: qty,
        }
    }

    async fn seed_laptop(f: &Fixture) -> Product {
        f.service
            .create_product(draft("Laptop", "Electronics", dec!(999.99), 10))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn cold_listing_reads_store_and_populates_cache() {
        let f = fixture();
        seed_laptop(&f).await;

        let products = f.service.get_all_products().await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(f.store.list_calls(), 1);
        assert!(f.backend.exists("products:all").await);
    }

    #[tokio::test]
    async fn warm_listing_short_circuits_the_store() {
        let f = fixture();
        seed_laptop(&f).await;

        let first = f.service.get_all_products().await.unwrap();
        let second = f.service.get_all_products().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(f.store.list_calls(), 1);
    }

    #[tokio::test]
    async fn cache_hit_is_served_without_checking_write_recency() {
        let f = fixture();
        seed_laptop(&f).await;
        f.service.get_all_products().await.unwrap();

        // Write behind the service's back; the cached listing stays
        // authoritative until invalidated or expired.
        f.store
            .inner
            .insert(draft("Keyboard", "Electronics", dec!(49.99), 20))
            .await
            .unwrap();

        let listed = f.service.get_all_products().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(f.store.list_calls(), 1);
    }

    #[tokio::test]
    async fn empty_listing_is_never_cached() {
        let f = fixture();

        assert!(f.service.get_all_products().await.unwrap().is_empty());
        assert!(f.service.get_all_products().await.unwrap().is_empty());

        // Both calls hit the store; no negative caching of the list.
        assert_eq!(f.store.list_calls(), 2);
        assert!(!f.backend.exists("products:all").await);
    }

    #[tokio::test]
    async fn per_id_read_populates_and_then_hits_cache() {
        let f = fixture();
        let laptop = seed_laptop(&f).await;

        let first = f.service.get_product_by_id(laptop.id).await.unwrap();
        let second = f.service.get_product_by_id(laptop.id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(f.store.get_calls(), 1);
        assert!(f.backend.exists(&format!("products:{}", laptop.id)).await);
    }

    #[tokio::test]
    async fn absence_is_never_cached() {
        let f = fixture();

        assert!(f.service.get_product_by_id(404).await.unwrap().is_none());
        assert!(f.service.get_product_by_id(404).await.unwrap().is_none());

        assert_eq!(f.store.get_calls(), 2);
        assert!(!f.backend.exists("products:404").await);
    }

    #[tokio::test]
    async fn create_invalidates_the_listing_only() {
        let f = fixture();
        seed_laptop(&f).await;
        f.service.get_all_products().await.unwrap();
        assert!(f.backend.exists("products:all").await);

        let mouse = f
            .service
            .create_product(draft("Mouse", "Electronics", dec!(25.50), 50))
            .await
            .unwrap();

        assert!(!f.backend.exists("products:all").await);
        // Per-id entry is not populated proactively.
        assert!(!f.backend.exists(&format!("products:{}", mouse.id)).await);
    }

    #[tokio::test]
    async fn update_invalidates_listing_and_item_entries() {
        let f = fixture();
        let laptop = seed_laptop(&f).await;
        f.service.get_all_products().await.unwrap();
        f.service.get_product_by_id(laptop.id).await.unwrap();
        let item_key = format!("products:{}", laptop.id);
        assert!(f.backend.exists(&item_key).await);

        let mut changed = laptop.clone();
        changed.price = dec!(899.99);
        let updated = f.service.update_product(&changed).await.unwrap();

        assert_eq!(updated.price, dec!(899.99));
        assert!(!f.backend.exists("products:all").await);
        assert!(!f.backend.exists(&item_key).await);

        // The next per-id read reflects the update, not the old entry.
        let reread = f.service.get_product_by_id(laptop.id).await.unwrap().unwrap();
        assert_eq!(reread.price, dec!(899.99));
    }

    #[tokio::test]
    async fn update_of_missing_id_fails_without_invalidation() {
        let f = fixture();
        let laptop = seed_laptop(&f).await;
        f.service.get_all_products().await.unwrap();

        let mut ghost = laptop.clone();
        ghost.id = 404;
        let err = f.service.update_product(&ghost).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(f.backend.exists("products:all").await);
    }

    #[tokio::test]
    async fn delete_invalidates_both_entries_only_when_a_row_was_removed() {
        let f = fixture();
        let laptop = seed_laptop(&f).await;
        f.service.get_all_products().await.unwrap();
        f.service.get_product_by_id(laptop.id).await.unwrap();
        let item_key = format!("products:{}", laptop.id);

        assert!(f.service.delete_product(laptop.id).await.unwrap());
        assert!(!f.backend.exists("products:all").await);
        assert!(!f.backend.exists(&item_key).await);
    }

    #[tokio::test]
    async fn delete_of_absent_id_returns_false_and_touches_nothing() {
        let f = fixture();
        seed_laptop(&f).await;
        f.service.get_all_products().await.unwrap();

        assert!(!f.service.delete_product(404).await.unwrap());
        assert!(f.backend.exists("products:all").await);
    }

    #[tokio::test]
    async fn search_bypasses_the_cache_in_both_directions() {
        let f = fixture();
        seed_laptop(&f).await;
        f.service
            .create_product(draft("Mouse", "Electronics", dec!(25.50), 50))
            .await
            .unwrap();
        f.service
            .create_product(draft("Desk Chair", "Furniture", dec!(150.00), 5))
            .await
            .unwrap();

        let names: Vec<String> = f
            .service
            .search_products("electronics")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, vec!["Laptop", "Mouse"]);
        assert_eq!(f.store.search_calls(), 1);
        // Nothing read from or written to the cache.
        assert!(!f.backend.exists("products:all").await);
    }

    #[tokio::test]
    async fn search_ignores_a_stale_cached_listing() {
        let f = fixture();
        seed_laptop(&f).await;
        f.service.get_all_products().await.unwrap();

        // Mutate the store directly so the cached listing is stale.
        f.store
            .inner
            .insert(draft("Mousepad", "Electronics", dec!(9.99), 99))
            .await
            .unwrap();

        let hits = f.service.search_products("mousepad").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Mousepad");
    }

    #[tokio::test]
    async fn blank_search_term_lists_everything_from_the_store() {
        let f = fixture();
        seed_laptop(&f).await;

        let all = f.service.search_products("   ").await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(f.store.search_calls(), 1);
        assert_eq!(f.store.list_calls(), 0);
    }

    #[tokio::test]
    async fn search_matches_price_text() {
        let f = fixture();
        seed_laptop(&f).await;
        f.service
            .create_product(draft("Mouse", "Electronics", dec!(25.50), 50))
            .await
            .unwrap();

        let hits = f.service.search_products("999").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Laptop");
    }

    #[tokio::test]
    async fn clear_cache_drops_the_listing_but_not_item_entries() {
        let f = fixture();
        let laptop = seed_laptop(&f).await;
        f.service.get_all_products().await.unwrap();
        f.service.get_product_by_id(laptop.id).await.unwrap();
        let item_key = format!("products:{}", laptop.id);

        f.service.clear_cache().await;

        assert!(!f.backend.exists("products:all").await);
        assert!(f.backend.exists(&item_key).await);
    }

    #[tokio::test]
    async fn create_assigns_identity_and_a_cold_read_round_trips() {
        let f = fixture();
        let created = seed_laptop(&f).await;

        let read = f
            .service
            .get_product_by_id(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn listing_flow_scenario() {
        // store: {Laptop}. cold list -> store. warm list -> cache.
        // create Mouse -> listing invalidated. list -> store, name order.
        let f = fixture();
        seed_laptop(&f).await;

        let cold = f.service.get_all_products().await.unwrap();
        assert_eq!(cold.len(), 1);
        assert_eq!(f.store.list_calls(), 1);

        let warm = f.service.get_all_products().await.unwrap();
        assert_eq!(warm, cold);
        assert_eq!(f.store.list_calls(), 1);

        let mouse = f
            .service
            .create_product(draft("Mouse", "Electronics", dec!(25.50), 50))
            .await
            .unwrap();
        assert_eq!(mouse.id, 2);

        let names: Vec<String> = f
            .service
            .get_all_products()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Laptop", "Mouse"]);
        assert_eq!(f.store.list_calls(), 2);
    }

    #[tokio::test]
    async fn expired_listing_entry_falls_back_to_the_store() {
        let policy = CachePolicy {
            keys: CacheKeys::default(),
            ttl: Duration::from_millis(50),
        };
        let f = fixture_with_policy(policy);
        seed_laptop(&f).await;

        f.service.get_all_products().await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        f.service.get_all_products().await.unwrap();

        assert_eq!(f.store.list_calls(), 2);
    }

    #[tokio::test]
    async fn custom_key_scheme_is_used_for_population_and_invalidation() {
        let policy = CachePolicy {
            keys: CacheKeys::new("inv:list", "inv:item:"),
            ttl: Duration::from_secs(600),
        };
        let f = fixture_with_policy(policy);
        let laptop = seed_laptop(&f).await;

        f.service.get_all_products().await.unwrap();
        f.service.get_product_by_id(laptop.id).await.unwrap();
        assert!(f.backend.exists("inv:list").await);
        assert!(f.backend.exists(&format!("inv:item:{}", laptop.id)).await);

        f.service.delete_product(laptop.id).await.unwrap();
        assert!(!f.backend.exists("inv:list").await);
        assert!(!f.backend.exists(&format!("inv:item:{}", laptop.id)).await);
    }
}
