//! Caller-facing order operations.
//!
//! Each call materializes a fresh [`Order`] from storage, so the cached
//! workflow never outlives a single request.

use crate::order::{
    default_order_definition, Order, OrderDefinition, OrderError, OrderEvent, OrderResult,
    OrderSnapshot,
};
use crate::store::OrderStore;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Create, look up, list and advance orders held in `St`.
pub struct OrderService<St: OrderStore> {
    store: St,
    definition: Arc<OrderDefinition>,
}

impl<St: OrderStore> OrderService<St> {
    pub fn new(store: St, definition: Arc<OrderDefinition>) -> Self {
        Self { store, definition }
    }

    /// Service using the default, log-emitting order workflow.
    pub fn with_default_hooks(store: St) -> OrderResult<Self> {
        Ok(Self::new(store, default_order_definition()?))
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    /// Create an order for `user_id` in state `created`.
    pub fn create(&self, user_id: i64) -> OrderResult<OrderSnapshot> {
        let mut order = Order::new(user_id, Arc::clone(&self.definition));
        order.save(&self.store)?;

        info!(order_id = %order.id(), user_id, "Order created");
        Ok(order.snapshot())
    }

    pub fn get(&self, id: Uuid) -> OrderResult<OrderSnapshot> {
        Ok(self.load(id)?.snapshot())
    }

    pub fn list(&self) -> OrderResult<Vec<OrderSnapshot>> {
        Ok(self
            .store
            .list()?
            .into_iter()
            .map(|record| Order::from_record(record, Arc::clone(&self.definition)).snapshot())
            .collect())
    }

    /// Apply the event named `event_name` to order `id`.
    pub fn advance(&self, id: Uuid, event_name: &str) -> OrderResult<OrderSnapshot> {
        let event: OrderEvent = event_name
            .parse()
            .map_err(|_| OrderError::UnknownEvent(event_name.to_string()))?;

        let mut order = self.load(id)?;
        order.advance(event, &self.store)?;
        Ok(order.snapshot())
    }

    /// Materialize order `id` from storage.
    pub fn load(&self, id: Uuid) -> OrderResult<Order> {
        let record = self.store.find(id)?;
        Ok(Order::from_record(record, Arc::clone(&self.definition)))
    }
}
