//! Runtime side of the state machine.
//!
//! A [`WorkflowDefinition`] is the immutable configuration (states,
//! transitions, hooks). A [`Workflow`] is one instance of it that tracks a
//! current state and evaluates triggers:
//!
//! 1. find the first declared transition for (current state, event)
//! 2. run the event's hooks in registration order
//! 3. move to the destination state
//!
//! A failure at step 1 or 2 leaves the state untouched.

mod definition;
mod machine;
mod transition;

pub use definition::WorkflowDefinition;
pub use machine::Workflow;
pub use transition::{
    Hook, HookError, InvalidStateError, Transition, TransitionContext, TransitionError,
};
