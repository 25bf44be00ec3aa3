//! Storage error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur in an order store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Order {id} not found")]
    NotFound { id: Uuid },

    #[error("Order {id} already exists")]
    Duplicate { id: Uuid },

    /// The record was written by someone else since it was loaded.
    #[error("Order {id} was modified concurrently (expected version {expected}, found {found})")]
    Conflict { id: Uuid, expected: u64, found: u64 },

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
