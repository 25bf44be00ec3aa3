//! Side effects fired when an order event succeeds.

use crate::engine::HookError;
use crate::order::states::OrderEvent;
use tracing::info;

/// Receiver for order lifecycle notifications.
///
/// The order workflow registers one hook per event that forwards to the
/// notifier. Returning an error aborts the transition.
pub trait OrderNotifier: Send + Sync {
    fn notify(&self, event: OrderEvent, message: &str) -> Result<(), HookError>;
}

/// Human-readable notice for each event.
pub fn event_message(event: OrderEvent) -> &'static str {
    match event {
        OrderEvent::Process => "Order is being processed.",
        OrderEvent::Complete => "Order completed successfully!",
        OrderEvent::Fail => "Order processing failed. Notifying support.",
        OrderEvent::Cancel => "Order has been canceled.",
    }
}

/// Default notifier: writes each notice to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl OrderNotifier for TracingNotifier {
    fn notify(&self, event: OrderEvent, message: &str) -> Result<(), HookError> {
        info!(event = %event, "{message}");
        Ok(())
    }
}
