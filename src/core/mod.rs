//! Core workflow types.
//!
//! This module contains the pure vocabulary of the state machine:
//! - State identifiers via the `State` trait
//! - Event identifiers via the `Event` trait
//! - Guard predicates for transition control
//!
//! Nothing in this module has side effects.

mod event;
mod guard;
mod state;

pub use event::Event;
pub use guard::Guard;
pub use state::{State, UnknownIdentifier};
