//! Errors surfaced by the order adapter and service.

use crate::builder::ConfigurationErrors;
use crate::engine::{InvalidStateError, TransitionError};
use crate::store::StoreError;
use thiserror::Error;
use uuid::Uuid;

/// Errors returned to callers of order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order {id} not found")]
    NotFound { id: Uuid },

    /// The request was illegal for the order's current state.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The persisted state field does not name a declared state.
    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),

    #[error("Unknown order event '{0}'")]
    UnknownEvent(String),

    /// The transition succeeded in memory but could not be saved.
    #[error("Order {id} transitioned to '{state}' but could not be saved: {source}")]
    Persistence {
        id: Uuid,
        state: String,
        #[source]
        source: StoreError,
    },

    #[error("Order storage failed: {0}")]
    Storage(StoreError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationErrors),
}

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => Self::NotFound { id },
            other => Self::Storage(other),
        }
    }
}

impl OrderError {
    /// True when the request itself was rejected rather than failing to be
    /// recorded.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            Self::Transition(TransitionError::InvalidTransition { .. }) | Self::UnknownEvent(_)
        )
    }

    /// True when retrying the save (not the transition) may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}

/// Result type alias for order operations
pub type OrderResult<T> = Result<T, OrderError>;
