//! Redis connection configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the Redis cache backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Enable Redis. When false the server uses a local in-process
    /// cache instead.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Redis connection URL, e.g. `redis://localhost:6379`.
    #[serde(default = "default_url")]
    pub url: String,

    /// Connection pool size.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_enabled() -> bool {
    false
}

fn default_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_pool_size() -> usize {
    10
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            url: default_url(),
            pool_size: default_pool_size(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
