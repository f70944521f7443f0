//! Storage abstraction for the Stockroom inventory server.
//!
//! This crate defines the contract every product store backend must
//! implement, plus the error taxonomy shared by all backends.

pub mod error;
pub mod traits;

pub use error::StorageError;
pub use traits::ProductStore;
