//! Core domain types shared by every Stockroom crate.

pub mod product;

pub use product::{Product, ProductDraft};
