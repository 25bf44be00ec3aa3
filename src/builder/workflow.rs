//! Builder for declaring workflow definitions.

use crate::builder::error::{ConfigurationError, ConfigurationErrors};
use crate::core::{Event, Guard, State};
use crate::engine::{Hook, HookError, Transition, TransitionContext, WorkflowDefinition};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ConfigurationError>>;

/// Builder for declaring a workflow with a fluent API.
///
/// Declarations are collected without checking; [`build`](Self::build)
/// validates the whole set and reports every problem it finds.
///
/// # Example
///
/// ```
/// use orderflow::builder::WorkflowBuilder;
/// use orderflow::engine::Workflow;
/// use orderflow::{event_enum, state_enum};
/// use std::sync::Arc;
///
/// state_enum! {
///     enum Light { Red => "red", Green => "green" }
/// }
/// event_enum! {
///     enum Signal { Go => "go", Stop => "stop" }
/// }
///
/// let definition = WorkflowBuilder::new()
///     .declare_state(Light::Red)
///     .declare_state(Light::Green)
///     .declare_transition(Signal::Go, Light::Red, Light::Green)
///     .declare_transition(Signal::Stop, Light::Green, Light::Red)
///     .build()
///     .unwrap();
///
/// let mut light = Workflow::initialize(Arc::new(definition), Light::Red).unwrap();
/// light.trigger(&Signal::Go).unwrap();
/// assert_eq!(light.state(), &Light::Green);
/// ```
pub struct WorkflowBuilder<S: State, E: Event> {
    states: Vec<S>,
    transitions: Vec<Transition<S, E>>,
    hooks: Vec<(E, Hook<S, E>)>,
}

impl<S: State + 'static, E: Event + 'static> WorkflowBuilder<S, E> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            transitions: Vec::new(),
            hooks: Vec::new(),
        }
    }

    /// Register a valid state. Declaring a state twice is a no-op.
    pub fn declare_state(mut self, state: S) -> Self {
        if !self.states.contains(&state) {
            self.states.push(state);
        }
        self
    }

    /// Register a legal transition.
    ///
    /// Both states must be declared by the time [`build`](Self::build) runs.
    pub fn declare_transition(mut self, event: E, from: S, to: S) -> Self {
        self.transitions.push(Transition {
            event,
            from,
            to,
            guard: None,
        });
        self
    }

    /// Register a transition that only fires while `guard` accepts the
    /// current state.
    pub fn declare_guarded_transition<F>(mut self, event: E, from: S, to: S, guard: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.transitions.push(Transition {
            event,
            from,
            to,
            guard: Some(Guard::new(guard)),
        });
        self
    }

    /// Register a hook to run whenever `event` fires successfully.
    ///
    /// Several hooks on one event run in registration order.
    pub fn declare_hook<F>(mut self, event: E, hook: F) -> Self
    where
        F: Fn(&TransitionContext<S, E>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        let hook: Hook<S, E> = Arc::new(hook);
        self.hooks.push((event, hook));
        self
    }

    /// Validate the declarations and freeze them into a definition.
    pub fn build(self) -> Result<WorkflowDefinition<S, E>, ConfigurationErrors> {
        let mut checks: Vec<Check> = Vec::new();

        if self.states.is_empty() {
            checks.push(Validation::fail(ConfigurationError::NoStates));
        }

        for transition in &self.transitions {
            checks.push(self.check_declared(&transition.event, &transition.from));
            checks.push(self.check_declared(&transition.event, &transition.to));
        }

        for (event, _) in &self.hooks {
            let check = if self.transitions.iter().any(|t| t.event == *event) {
                Validation::success(())
            } else {
                Validation::fail(ConfigurationError::HookWithoutTransition {
                    event: event.name().to_string(),
                })
            };
            checks.push(check);
        }

        Validation::all_vec(checks)
            .into_result()
            .map_err(|errors| ConfigurationErrors(errors.into_vec()))?;

        Ok(WorkflowDefinition {
            states: self.states,
            transitions: self.transitions,
            hooks: self.hooks,
        })
    }

    fn check_declared(&self, event: &E, state: &S) -> Check {
        if self.states.contains(state) {
            Validation::success(())
        } else {
            Validation::fail(ConfigurationError::UndeclaredState {
                event: event.name().to_string(),
                state: state.name().to_string(),
            })
        }
    }
}

impl<S: State + 'static, E: Event + 'static> Default for WorkflowBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
