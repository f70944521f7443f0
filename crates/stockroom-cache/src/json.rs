//! Typed JSON layer over the byte-level backend.
//!
//! Values are stored as JSON so Redis entries stay inspectable with
//! standard tooling. A payload that fails to deserialize is treated as
//! a miss: the poisoned entry is dropped and `None` returned, never an
//! error.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::backend::CacheBackend;

/// Typed cache gateway.
#[derive(Clone)]
pub struct JsonCache {
    backend: CacheBackend,
}

impl JsonCache {
    /// Create a new typed cache over the given backend.
    pub fn new(backend: CacheBackend) -> Self {
        Self { backend }
    }

    /// Get and deserialize a cached value.
    ///
    /// Returns `None` for absent keys, backend failures, and malformed
    /// payloads alike; malformed payloads are evicted on the way out.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let data = self.backend.get(key).await?;
        match serde_json::from_slice(&data) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to deserialize cached value");
                self.backend.remove(key).await;
                None
            }
        }
    }

    /// Serialize and store a value with an optional TTL.
    ///
    /// A serialization failure is logged and the write skipped; the
    /// cache never surfaces an error to its caller.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) {
        match serde_json::to_vec(value) {
            Ok(data) => self.backend.set(key, data, ttl).await,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to serialize value for cache");
            }
        }
    }

    /// Remove a cache entry.
    pub async fn remove(&self, key: &str) {
        self.backend.remove(key).await;
    }

    /// Check whether a key currently holds a live entry.
    pub async fn exists(&self, key: &str) -> bool {
        self.backend.exists(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        name: String,
        count: u32,
    }

    fn cache() -> JsonCache {
        JsonCache::new(CacheBackend::new_local())
    }

    #[tokio::test]
    async fn typed_round_trip() {
        let cache = cache();
        let payload = Payload {
            name: "widget".into(),
            count: 3,
        };

        cache
            .set_json("key", &payload, Some(Duration::from_secs(60)))
            .await;

        assert_eq!(cache.get_json::<Payload>("key").await, Some(payload));
    }

    #[tokio::test]
    async fn absent_key_is_none() {
        let cache = cache();
        assert_eq!(cache.get_json::<Payload>("missing").await, None);
    }

    #[tokio::test]
    async fn malformed_payload_is_a_miss_and_gets_evicted() {
        let backend = CacheBackend::new_local();
        let cache = JsonCache::new(backend.clone());

        backend.set("key", b"{not json".to_vec(), None).await;

        assert_eq!(cache.get_json::<Payload>("key").await, None);
        // The poisoned entry was dropped, not left to fail again.
        assert!(!backend.exists("key").await);
    }

    #[tokio::test]
    async fn remove_then_get_misses() {
        let cache = cache();
        cache
            .set_json("key", &Payload { name: "x".into(), count: 1 }, None)
            .await;
        cache.remove("key").await;
        assert_eq!(cache.get_json::<Payload>("key").await, None);
    }
}
