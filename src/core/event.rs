//! Event trait for named workflow triggers.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for events a caller can trigger against a workflow.
///
/// Like [`State`](super::State), events form a closed set and are
/// identified by name. The name is what callers send over the wire and what
/// appears in transition errors.
///
/// # Example
///
/// ```rust
/// use orderflow::core::Event;
/// use orderflow::event_enum;
///
/// event_enum! {
///     pub enum DoorEvent {
///         Open => "open",
///         Close => "close",
///     }
/// }
///
/// assert_eq!(DoorEvent::Close.name(), "close");
/// assert_eq!("open".parse::<DoorEvent>().unwrap(), DoorEvent::Open);
/// ```
pub trait Event:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the event's identifier.
    fn name(&self) -> &str;
}
