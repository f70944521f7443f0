//! Error types for the PostgreSQL backend.

use sqlx_core::error::Error as SqlxError;
use stockroom_storage::StorageError;

/// Errors specific to the PostgreSQL backend's setup phase.
#[derive(Debug, thiserror::Error)]
pub enum PostgresError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connection(#[from] SqlxError),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },
}

impl PostgresError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<PostgresError> for StorageError {
    fn from(err: PostgresError) -> Self {
        match err {
            PostgresError::Connection(e) => StorageError::connection(e.to_string()),
            PostgresError::Migration(e) => StorageError::internal(format!("Migration error: {e}")),
            PostgresError::Config { message } => {
                StorageError::internal(format!("Configuration error: {message}"))
            }
        }
    }
}

/// Maps a query-time sqlx error onto the shared storage taxonomy.
///
/// Connectivity failures become `Connection`; everything else
/// (constraint violations, decode failures) is `Internal`.
pub(crate) fn query_error(context: &str, e: SqlxError) -> StorageError {
    match e {
        SqlxError::Io(_) | SqlxError::PoolTimedOut | SqlxError::PoolClosed => {
            StorageError::connection(format!("{context}: {e}"))
        }
        _ => StorageError::internal(format!("{context}: {e}")),
    }
}

/// Result type alias for PostgreSQL setup operations.
pub type Result<T> = std::result::Result<T, PostgresError>;
