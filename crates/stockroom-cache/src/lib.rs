//! Cache gateway for the Stockroom inventory server.
//!
//! The cache is strictly an optimization, never a dependency for
//! correctness or availability: every backend failure is logged and
//! swallowed, degrading reads to always-miss. Two backends are
//! provided: a local in-process map (tests, cache-disabled
//! deployments) and Redis via a deadpool pool.

pub mod backend;
pub mod config;
pub mod json;

pub use backend::{CacheBackend, CachedEntry};
pub use config::RedisConfig;
pub use json::JsonCache;

/// Creates a cache backend from Redis configuration.
///
/// Falls back to the local backend when Redis is disabled, when the
/// pool cannot be created, or when the initial connection check fails.
/// The server keeps running either way.
pub async fn create_cache_backend(config: &RedisConfig) -> CacheBackend {
    use std::time::Duration;

    if !config.enabled {
        tracing::info!("Redis disabled, using local cache only");
        return CacheBackend::new_local();
    }

    tracing::info!(url = %config.url, "Connecting to Redis");

    let mut redis_config = deadpool_redis::Config::from_url(&config.url);
    if let Some(ref mut pool_config) = redis_config.pool {
        pool_config.max_size = config.pool_size;
        pool_config.timeouts.wait = Some(Duration::from_millis(config.timeout_ms));
        pool_config.timeouts.create = Some(Duration::from_millis(config.timeout_ms));
        pool_config.timeouts.recycle = Some(Duration::from_millis(config.timeout_ms));
    }

    let pool = match redis_config.create_pool(Some(deadpool_redis::Runtime::Tokio1)) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create Redis pool, falling back to local cache");
            return CacheBackend::new_local();
        }
    };

    match pool.get().await {
        Ok(_) => {
            tracing::info!("Connected to Redis");
            CacheBackend::new_redis(pool)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Redis unreachable, falling back to local cache");
            CacheBackend::new_local()
        }
    }
}
