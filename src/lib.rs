//! Orderflow: an explicit finite-state machine for order lifecycles
//!
//! The crate is split into a reusable, pure state-machine engine and a thin
//! adapter that binds one engine instance to a persisted order record.
//!
//! # Core Concepts
//!
//! - **State / Event**: closed identifier sets via the `State` and `Event` traits
//! - **Definition**: immutable states, transitions and hooks, built once with
//!   [`WorkflowBuilder`](builder::WorkflowBuilder)
//! - **Workflow**: one engine instance tracking a current state
//! - **Order**: a durable record whose state field only changes through
//!   [`Order::advance`](order::Order::advance)
//!
//! # Example
//!
//! ```rust
//! use orderflow::order::OrderState;
//! use orderflow::service::OrderService;
//! use orderflow::store::MemoryStore;
//!
//! let service = OrderService::with_default_hooks(MemoryStore::new()).unwrap();
//! let order = service.create(1).unwrap();
//! assert_eq!(order.state, OrderState::Created.as_str());
//!
//! let order = service.advance(order.id, "process").unwrap();
//! assert_eq!(order.state, "processing");
//!
//! let err = service.advance(order.id, "cancel").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Cannot transition from processing using event cancel"
//! );
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod logging;
pub mod order;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use builder::{ConfigurationError, ConfigurationErrors, WorkflowBuilder};
pub use core::{Event, Guard, State};
pub use engine::{Workflow, WorkflowDefinition};
pub use order::{Order, OrderError, OrderEvent, OrderState};
