//! Byte-level cache backend: local map or Redis.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use deadpool_redis::Pool;
use redis::AsyncCommands;

/// A cached entry with optional TTL.
#[derive(Clone, Debug)]
pub struct CachedEntry {
    pub data: Vec<u8>,
    pub cached_at: Instant,
    pub ttl: Option<Duration>,
}

impl CachedEntry {
    /// Create a new cached entry. `None` TTL means no expiration.
    pub fn new(data: Vec<u8>, ttl: Option<Duration>) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
            ttl,
        }
    }

    /// Check if this entry has expired.
    pub fn is_expired(&self) -> bool {
        match self.ttl {
            Some(ttl) => self.cached_at.elapsed() > ttl,
            None => false,
        }
    }
}

/// Cache backend over opaque byte payloads.
///
/// - `Local`: in-process DashMap with TTL stamping, used for tests and
///   cache-disabled deployments.
/// - `Redis`: external Redis service behind a deadpool pool.
///
/// Every operation is idempotent and infallible from the caller's
/// point of view: backend failures are logged at `warn` and reported
/// as a miss (`get` → `None`, `exists` → `false`) or silently dropped
/// (`set`, `remove`). Writes are awaited so a mutation handler only
/// returns after its invalidation has been attempted.
#[derive(Clone)]
pub enum CacheBackend {
    /// In-process map, no network.
    Local(Arc<DashMap<String, CachedEntry>>),

    /// External Redis service.
    Redis(Pool),
}

impl CacheBackend {
    /// Create a new local-only cache backend.
    pub fn new_local() -> Self {
        CacheBackend::Local(Arc::new(DashMap::new()))
    }

    /// Create a new Redis-backed cache backend.
    pub fn new_redis(pool: Pool) -> Self {
        CacheBackend::Redis(pool)
    }

    /// Get a value from the cache. Absence and backend failure are
    /// indistinguishable to the caller.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self {
            CacheBackend::Local(map) => {
                if let Some(entry) = map.get(key) {
                    if !entry.is_expired() {
                        return Some(entry.data.clone());
                    }
                    drop(entry);
                    map.remove(key);
                }
                None
            }
            CacheBackend::Redis(pool) => match pool.get().await {
                Ok(mut conn) => match conn.get::<_, Option<Vec<u8>>>(key).await {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::warn!(key = %key, error = %e, "Redis GET error");
                        None
                    }
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to get Redis connection");
                    None
                }
            },
        }
    }

    /// Set a value with an optional TTL. `None` installs an entry with
    /// no expiration.
    pub async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) {
        match self {
            CacheBackend::Local(map) => {
                map.insert(key.to_string(), CachedEntry::new(value, ttl));
            }
            CacheBackend::Redis(pool) => {
                let mut conn = match pool.get().await {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to get Redis connection");
                        return;
                    }
                };
                let result = match ttl {
                    Some(ttl) => {
                        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
                            .await
                    }
                    None => conn.set::<_, _, ()>(key, value).await,
                };
                if let Err(e) = result {
                    tracing::warn!(key = %key, error = %e, "Redis SET error");
                } else {
                    tracing::debug!(key = %key, "cache set");
                }
            }
        }
    }

    /// Remove a cache entry. Removing an absent key is a no-op.
    pub async fn remove(&self, key: &str) {
        match self {
            CacheBackend::Local(map) => {
                map.remove(key);
                tracing::debug!(key = %key, "cache invalidated (local)");
            }
            CacheBackend::Redis(pool) => {
                let mut conn = match pool.get().await {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to get Redis connection");
                        return;
                    }
                };
                if let Err(e) = conn.del::<_, ()>(key).await {
                    tracing::warn!(key = %key, error = %e, "Redis DEL error");
                } else {
                    tracing::debug!(key = %key, "cache invalidated");
                }
            }
        }
    }

    /// Check whether a key currently holds a live entry.
    pub async fn exists(&self, key: &str) -> bool {
        match self {
            CacheBackend::Local(map) => map.get(key).is_some_and(|entry| !entry.is_expired()),
            CacheBackend::Redis(pool) => match pool.get().await {
                Ok(mut conn) => match conn.exists::<_, bool>(key).await {
                    Ok(exists) => exists,
                    Err(e) => {
                        tracing::warn!(key = %key, error = %e, "Redis EXISTS error");
                        false
                    }
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to get Redis connection");
                    false
                }
            },
        }
    }
}
