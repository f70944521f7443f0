//! The cache-aside inventory service.
//!
//! [`InventoryService`] orchestrates reads and writes between two
//! independently-failable collaborators: the durable product store
//! (always authoritative) and the cache gateway (always optional).
//! Reads consult the cache first and repopulate it after a store
//! fallback; mutations invalidate affected keys strictly after the
//! store write commits. The cache can disappear at any moment without
//! any operation failing; staleness is bounded only by the entry TTL.

pub mod keys;
pub mod service;

pub use keys::CacheKeys;
pub use service::{CachePolicy, InventoryService};
