//! Order Lifecycle
//!
//! Drives orders through the built-in order workflow with a custom notifier
//! standing in for an outbound notification channel.
//!
//! Key concepts:
//! - Order states (created -> processing -> completed / failed, created -> canceled)
//! - Injecting side effects through `OrderNotifier`
//! - Illegal events rejected without touching stored state
//! - A failing notifier aborts the transition
//!
//! Run with: cargo run --example order_lifecycle

use orderflow::engine::HookError;
use orderflow::order::{order_definition, OrderError, OrderEvent, OrderNotifier};
use orderflow::service::OrderService;
use orderflow::store::MemoryStore;
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects notices in memory and can be told to refuse one event.
#[derive(Default)]
struct Outbox {
    sent: Mutex<Vec<String>>,
    refuse: Option<OrderEvent>,
}

impl OrderNotifier for Outbox {
    fn notify(&self, event: OrderEvent, message: &str) -> Result<(), HookError> {
        if self.refuse == Some(event) {
            return Err(HookError::new(format!("outbox refused {event}")));
        }
        println!("  [Outbox] {message}");
        self.sent.lock().push(message.to_string());
        Ok(())
    }
}

fn service_with(outbox: Arc<Outbox>) -> Result<OrderService<MemoryStore>, OrderError> {
    let definition = order_definition(outbox)?;
    Ok(OrderService::new(MemoryStore::new(), Arc::new(definition)))
}

fn main() -> Result<(), OrderError> {
    println!("=== Order Lifecycle ===\n");

    let outbox = Arc::new(Outbox::default());
    let service = service_with(Arc::clone(&outbox))?;

    println!("Happy path:");
    let order = service.create(42)?;
    println!("  Created order {} ({})", order.id, order.state);
    for event in ["process", "complete"] {
        let order = service.advance(order.id, event)?;
        println!("  {event} -> {}", order.state);
    }
    println!();

    println!("Illegal event:");
    let order = service.create(7)?;
    match service.advance(order.id, "complete") {
        Err(e) => println!("  Rejected: {e}"),
        Ok(order) => println!("  Unexpectedly moved to {}", order.state),
    }
    println!("  Stored state is still {}", service.get(order.id)?.state);
    println!();

    println!("Cancel:");
    let order = service.advance(order.id, "cancel")?;
    println!("  cancel -> {}", order.state);
    println!();

    println!("Failing notifier:");
    let refusing = service_with(Arc::new(Outbox {
        refuse: Some(OrderEvent::Process),
        ..Outbox::default()
    }))?;
    let order = refusing.create(9)?;
    if let Err(e) = refusing.advance(order.id, "process") {
        println!("  Rejected: {e}");
    }
    println!("  Stored state is still {}", refusing.get(order.id)?.state);
    println!();

    println!("Notices sent: {}", outbox.sent.lock().len());
    Ok(())
}
