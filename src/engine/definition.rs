//! Immutable workflow configuration shared by every engine instance.

use crate::core::{Event, State};
use crate::engine::transition::{Hook, Transition};

/// Declared states, transitions and hooks of a workflow.
///
/// Built once by [`WorkflowBuilder`](crate::builder::WorkflowBuilder) and
/// shared (usually behind an `Arc`) by every [`Workflow`](crate::engine::Workflow)
/// instance. It never changes after construction.
pub struct WorkflowDefinition<S: State, E: Event> {
    pub(crate) states: Vec<S>,
    pub(crate) transitions: Vec<Transition<S, E>>,
    pub(crate) hooks: Vec<(E, Hook<S, E>)>,
}

impl<S: State, E: Event> WorkflowDefinition<S, E> {
    /// Declared states, in declaration order.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// Declared transitions, in declaration order.
    pub fn transitions(&self) -> &[Transition<S, E>] {
        &self.transitions
    }

    pub fn is_declared(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    /// First declared transition that fires for `event` from `current`.
    ///
    /// Declaration order decides between overlapping transitions.
    pub fn find_transition(&self, event: &E, current: &S) -> Option<&Transition<S, E>> {
        self.transitions.iter().find(|t| t.can_fire(event, current))
    }

    /// Transitions leaving `state`, ignoring guards.
    pub fn transitions_from<'a>(
        &'a self,
        state: &'a S,
    ) -> impl Iterator<Item = &'a Transition<S, E>> + 'a {
        self.transitions.iter().filter(move |t| t.from == *state)
    }

    /// Events that would currently succeed from `state`.
    pub fn available_events(&self, state: &S) -> Vec<&E> {
        let mut events: Vec<&E> = Vec::new();
        for transition in &self.transitions {
            if transition.can_fire(&transition.event, state) && !events.contains(&&transition.event)
            {
                events.push(&transition.event);
            }
        }
        events
    }

    /// Hooks registered for `event`, in registration order.
    pub fn hooks_for<'a>(&'a self, event: &'a E) -> impl Iterator<Item = &'a Hook<S, E>> + 'a {
        self.hooks
            .iter()
            .filter(move |(hooked, _)| hooked == event)
            .map(|(_, hook)| hook)
    }
}

impl<S: State, E: Event> std::fmt::Debug for WorkflowDefinition<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowDefinition")
            .field("states", &self.states)
            .field("transitions", &self.transitions)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
