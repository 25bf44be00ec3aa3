//! Order entity adapter.
//!
//! Binds the order state machine to a durable [`OrderRecord`]: the record's
//! text state field seeds a cached [`OrderWorkflow`], and every successful
//! [`Order::advance`] copies the new state back and saves it.

mod entity;
mod error;
mod notifier;
mod record;
mod states;
mod workflow;

pub use entity::Order;
pub use error::{OrderError, OrderResult};
pub use notifier::{event_message, OrderNotifier, TracingNotifier};
pub use record::{OrderRecord, OrderSnapshot};
pub use states::{OrderEvent, OrderState};
pub use workflow::{default_order_definition, order_definition, OrderDefinition, OrderWorkflow};
