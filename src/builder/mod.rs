//! Configuration-time API for declaring workflows.
//!
//! This module provides the fluent [`WorkflowBuilder`] and the
//! [`state_enum!`](crate::state_enum) / [`event_enum!`](crate::event_enum)
//! macros for declaring closed identifier sets with minimal boilerplate.

pub mod error;
pub mod macros;
pub mod workflow;

pub use error::{ConfigurationError, ConfigurationErrors};
pub use workflow::WorkflowBuilder;
