use std::sync::Arc;

use stockroom_cache::{JsonCache, create_cache_backend};
use stockroom_db_memory::InMemoryStore;
use stockroom_db_postgres::PostgresStore;
use stockroom_service::{CacheKeys, CachePolicy, InventoryService};
use stockroom_storage::ProductStore;

use crate::config::{AppConfig, StorageBackend};

/// Wires the configured store and cache backend into an
/// [`InventoryService`].
pub async fn build_service(cfg: &AppConfig) -> anyhow::Result<Arc<InventoryService>> {
    let store: Arc<dyn ProductStore> = match cfg.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory product store");
            Arc::new(InMemoryStore::new())
        }
        StorageBackend::Postgres => {
            tracing::info!("Connecting to PostgreSQL");
            Arc::new(PostgresStore::new(&cfg.storage.postgres).await?)
        }
    };

    let backend = create_cache_backend(&cfg.redis).await;
    let policy = CachePolicy {
        keys: CacheKeys::new(
            cfg.cache.listing_key.clone(),
            cfg.cache.item_key_prefix.clone(),
        ),
        ttl: cfg.cache.ttl(),
    };

    Ok(Arc::new(InventoryService::with_policy(
        store,
        JsonCache::new(backend),
        policy,
    )))
}
