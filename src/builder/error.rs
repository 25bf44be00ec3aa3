//! Configuration errors raised while building a workflow definition.

use thiserror::Error;

/// A single problem with a workflow declaration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("No states declared. Call .declare_state(state) before .build()")]
    NoStates,

    #[error("Transition '{event}' references undeclared state '{state}'")]
    UndeclaredState { event: String, state: String },

    #[error("Hook registered for event '{event}' which has no declared transition")]
    HookWithoutTransition { event: String },
}

/// Every problem found in a workflow declaration.
///
/// Building reports all problems at once rather than stopping at the first.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid workflow configuration: {}", join(.0))]
pub struct ConfigurationErrors(pub(crate) Vec<ConfigurationError>);

impl ConfigurationErrors {
    pub fn errors(&self) -> &[ConfigurationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn join(errors: &[ConfigurationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
