//! In-memory product store backend.
//!
//! Backs the dev-mode server and the service-layer tests. Implements
//! the full [`ProductStore`](stockroom_storage::ProductStore) contract
//! including the textual search semantics, so it can stand in for the
//! PostgreSQL backend anywhere durability is not required.

pub mod storage;

pub use storage::InMemoryStore;
