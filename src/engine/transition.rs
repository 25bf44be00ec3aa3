//! Transition declarations, hooks, and the errors a trigger can raise.

use crate::core::{Event, Guard, State};
use std::sync::Arc;
use thiserror::Error;

/// Context handed to a hook when its event fires.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionContext<S: State, E: Event> {
    pub event: E,
    pub from: S,
    pub to: S,
}

/// Error returned by a hook to abort the trigger that ran it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Side-effecting action bound to an event.
///
/// Hooks run once per successful trigger of their event, after the
/// transition has been resolved and before the state changes.
pub type Hook<S, E> = Arc<dyn Fn(&TransitionContext<S, E>) -> Result<(), HookError> + Send + Sync>;

/// Errors that can occur when triggering an event.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    /// No declared transition accepts this event from the current state.
    #[error("Cannot transition from {state} using event {event}")]
    InvalidTransition { event: String, state: String },

    /// A hook for the event failed; the state was not changed.
    #[error("Hook for event '{event}' failed: {source}")]
    HookFailed {
        event: String,
        #[source]
        source: HookError,
    },
}

impl TransitionError {
    /// Event name carried by the error.
    pub fn event(&self) -> &str {
        match self {
            Self::InvalidTransition { event, .. } | Self::HookFailed { event, .. } => event,
        }
    }
}

/// Seeding a workflow with a state its definition never declared.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("State '{state}' is not declared in this workflow")]
pub struct InvalidStateError {
    pub state: String,
}

/// A declared (event, source, destination) rule.
pub struct Transition<S: State, E: Event> {
    pub event: E,
    pub from: S,
    pub to: S,
    pub guard: Option<Guard<S>>,
}

impl<S: State, E: Event> Transition<S, E> {
    /// Check if this transition fires for `event` from the current state (pure)
    pub fn can_fire(&self, event: &E, current: &S) -> bool {
        if self.event != *event || *current != self.from {
            return false;
        }

        self.guard.as_ref().map_or(true, |g| g.check(current))
    }
}

impl<S: State, E: Event> Clone for Transition<S, E> {
    fn clone(&self) -> Self {
        Self {
            event: self.event.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            guard: self.guard.clone(),
        }
    }
}

impl<S: State, E: Event> std::fmt::Debug for Transition<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("event", &self.event)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}
