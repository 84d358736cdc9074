//! Store error types.

use thiserror::Error;

use catalog_core::NumericError;

/// Result alias for catalog store operations.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Errors that can occur during catalog store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened (bad path, permissions, locked, not a database).
    #[error("store unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// Requested entity was not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up.
        entity: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A setting value could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Caller-supplied input could not be coerced.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] NumericError),

    /// The session flag file could not be read or written.
    #[error("session storage error: {0}")]
    Session(#[from] std::io::Error),

    /// The session flag file exists but is not a JSON object.
    #[error("session storage is corrupted: {0}")]
    SessionFormat(#[source] serde_json::Error),
}

impl StoreError {
    /// Build a `NotFound` error for an entity kind and id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether this error is a `NotFound`.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
