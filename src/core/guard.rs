//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions attached to a declared transition.
//! A transition whose guard rejects the current state does not match.

use super::state::State;
use std::fmt;
use std::sync::Arc;

/// Pure predicate that determines if a transition can fire.
///
/// # Example
///
/// ```rust
/// use orderflow::core::{Guard, State};
/// use orderflow::state_enum;
///
/// state_enum! {
///     enum TaskState {
///         Pending => "pending",
///         Running => "running",
///         Complete => "complete",
///     }
///     final: [Complete]
/// }
///
/// let can_transition = Guard::new(|state: &TaskState| !state.is_final());
///
/// assert!(can_transition.check(&TaskState::Pending));
/// assert!(can_transition.check(&TaskState::Running));
/// assert!(!can_transition.check(&TaskState::Complete));
/// ```
pub struct Guard<S: State> {
    predicate: Arc<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard allows a transition from this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
