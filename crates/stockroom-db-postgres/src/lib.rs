//! PostgreSQL product store backend.
//!
//! Persistence for the Stockroom inventory server: a connection pool,
//! embedded migrations, and a [`ProductStore`](stockroom_storage::ProductStore)
//! implementation over a single `products` table.

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod storage;

pub use config::PostgresConfig;
pub use error::PostgresError;
pub use storage::PostgresStore;
