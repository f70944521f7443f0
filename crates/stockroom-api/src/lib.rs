//! API-boundary types for the Stockroom inventory server.
//!
//! Request validation lives here, not in the service layer: handlers
//! hand the service already-validated values and map its errors back
//! to HTTP statuses via [`ApiError`].

pub mod dto;
pub mod error;

pub use dto::{CreateProductRequest, UpdateProductRequest};
pub use error::ApiError;
