//! Storage error types shared by all product store backends.

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested product was not found.
    ///
    /// Only `update` reports a missing row this way; `get_by_id`
    /// returns `None` and `delete` returns `false` instead.
    #[error("Product not found: {id}")]
    NotFound {
        /// The id of the product that was not found.
        id: i64,
    },

    /// Failed to reach the storage backend.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection failure.
        message: String,
    },

    /// Any other backend failure (constraint violation, bad row data).
    #[error("Internal storage error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    /// Creates a new `Connection` error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::not_found(42);
        assert_eq!(err.to_string(), "Product not found: 42");

        let err = StorageError::connection("refused");
        assert_eq!(err.to_string(), "Connection error: refused");
    }

    #[test]
    fn test_not_found_predicate() {
        assert!(StorageError::not_found(1).is_not_found());
        assert!(!StorageError::internal("boom").is_not_found());
    }
}
