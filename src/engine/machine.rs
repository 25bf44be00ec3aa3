//! Workflow instance that evaluates triggers against a definition.

use crate::core::{Event, State};
use crate::engine::definition::WorkflowDefinition;
use crate::engine::transition::{InvalidStateError, TransitionContext, TransitionError};
use std::sync::Arc;
use tracing::debug;

/// One running instance of a workflow definition.
///
/// Holds only the current state; everything else comes from the shared,
/// immutable definition.
pub struct Workflow<S: State + 'static, E: Event + 'static> {
    definition: Arc<WorkflowDefinition<S, E>>,
    current: S,
}

impl<S: State + 'static, E: Event + 'static> Workflow<S, E> {
    /// Create an instance bound to `initial`.
    ///
    /// Fails if `initial` is not one of the definition's declared states.
    pub fn initialize(
        definition: Arc<WorkflowDefinition<S, E>>,
        initial: S,
    ) -> Result<Self, InvalidStateError> {
        if !definition.is_declared(&initial) {
            return Err(InvalidStateError {
                state: initial.name().to_string(),
            });
        }

        Ok(Self {
            definition,
            current: initial,
        })
    }

    /// Get current state (pure)
    pub fn state(&self) -> &S {
        &self.current
    }

    pub fn definition(&self) -> &WorkflowDefinition<S, E> {
        &self.definition
    }

    /// Check if `event` would succeed from the current state (pure)
    pub fn can_trigger(&self, event: &E) -> bool {
        self.definition
            .find_transition(event, &self.current)
            .is_some()
    }

    /// Events that would currently succeed (pure)
    pub fn available_events(&self) -> Vec<&E> {
        self.definition.available_events(&self.current)
    }

    /// True when the current state is declared final.
    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    /// True when no declared transition leaves the current state.
    pub fn is_terminal(&self) -> bool {
        self.available_events().is_empty()
    }

    /// Fire `event`.
    ///
    /// Resolves the first matching transition, runs the event's hooks, then
    /// moves to the destination state. If no transition matches or a hook
    /// fails, the current state is left untouched.
    pub fn trigger(&mut self, event: &E) -> Result<&S, TransitionError> {
        let transition = self
            .definition
            .find_transition(event, &self.current)
            .ok_or_else(|| TransitionError::InvalidTransition {
                event: event.name().to_string(),
                state: self.current.name().to_string(),
            })?;

        let context = TransitionContext {
            event: event.clone(),
            from: self.current.clone(),
            to: transition.to.clone(),
        };

        for hook in self.definition.hooks_for(event) {
            hook(&context).map_err(|source| TransitionError::HookFailed {
                event: event.name().to_string(),
                source,
            })?;
        }

        debug!(
            event = event.name(),
            from = context.from.name(),
            to = context.to.name(),
            "Workflow transitioned"
        );

        self.current = context.to;
        Ok(&self.current)
    }
}

impl<S: State + 'static, E: Event + 'static> Clone for Workflow<S, E> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            current: self.current.clone(),
        }
    }
}

impl<S: State + 'static, E: Event + 'static> std::fmt::Debug for Workflow<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workflow")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
