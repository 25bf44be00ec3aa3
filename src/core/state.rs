//! Core State trait for workflow states.
//!
//! All workflow states must implement this trait, which provides
//! pure methods for inspecting state properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Trait for workflow states.
///
/// All methods are pure - no side effects. States are opaque identifiers
/// drawn from a closed set; the only attribute they carry is their name,
/// which doubles as the text stored in durable records.
///
/// # Required Traits
///
/// - `Clone`: States are copied into transition contexts
/// - `PartialEq`: States must be comparable for transition lookup
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States must be serializable for persistence
///
/// # Example
///
/// ```rust
/// use orderflow::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum TicketState {
///     Open,
///     Closed,
/// }
///
/// impl State for TicketState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "open",
///             Self::Closed => "closed",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Closed)
///     }
/// }
///
/// assert_eq!(TicketState::Open.name(), "open");
/// assert!(TicketState::Closed.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's identifier for display, logging and storage.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// This is informational only. Whether a workflow can leave a state is
    /// decided by the transitions its definition declares.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Text that does not name any variant of a closed identifier set.
///
/// Returned by the `FromStr` impls generated by [`state_enum!`](crate::state_enum)
/// and [`event_enum!`](crate::event_enum).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown {kind} identifier '{value}'")]
pub struct UnknownIdentifier {
    /// Name of the enum that rejected the text
    pub kind: &'static str,
    /// The rejected text
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::state_enum! {
        enum TestState {
            Initial => "initial",
            Processing => "processing",
            Complete => "complete",
            Failed => "failed",
        }
        final: [Complete, Failed]
        error: [Failed]
    }

    #[test]
    fn state_name_returns_storage_identifier() {
        assert_eq!(TestState::Initial.name(), "initial");
        assert_eq!(TestState::Processing.name(), "processing");
        assert_eq!(TestState::Complete.name(), "complete");
        assert_eq!(TestState::Failed.name(), "failed");
    }

    #[test]
    fn is_final_identifies_terminal_states() {
        assert!(!TestState::Initial.is_final());
        assert!(!TestState::Processing.is_final());
        assert!(TestState::Complete.is_final());
        assert!(TestState::Failed.is_final());
    }

    #[test]
    fn is_error_identifies_error_states() {
        assert!(!TestState::Initial.is_error());
        assert!(!TestState::Complete.is_error());
        assert!(TestState::Failed.is_error());
    }

    #[test]
    fn state_parses_from_its_name() {
        for state in TestState::ALL {
            let parsed: TestState = state.name().parse().unwrap();
            assert_eq!(&parsed, state);
        }
    }

    #[test]
    fn unknown_text_is_rejected() {
        let err = "archived".parse::<TestState>().unwrap_err();

        assert_eq!(err.kind, "TestState");
        assert_eq!(err.value, "archived");
        assert_eq!(err.to_string(), "Unknown TestState identifier 'archived'");
    }

    #[test]
    fn state_serializes_as_its_name() {
        let json = serde_json::to_string(&TestState::Processing).unwrap();
        assert_eq!(json, "\"processing\"");

        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, TestState::Processing);
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(TestState::Complete.to_string(), "complete");
    }
}
