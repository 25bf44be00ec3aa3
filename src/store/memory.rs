//! In-memory storage implementation

use super::{insert_into, update_in, OrderStore, StoreError, StoreResult, Table};
use crate::order::OrderRecord;
use parking_lot::RwLock;
use uuid::Uuid;

/// In-memory storage for development and testing
#[derive(Debug, Default)]
pub struct MemoryStore {
    orders: RwLock<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for MemoryStore {
    fn insert(&self, record: OrderRecord) -> StoreResult<OrderRecord> {
        insert_into(&mut self.orders.write(), record)
    }

    fn find(&self, id: Uuid) -> StoreResult<OrderRecord> {
        self.orders
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    fn list(&self) -> StoreResult<Vec<OrderRecord>> {
        Ok(self.orders.read().values().cloned().collect())
    }

    fn update(&self, record: OrderRecord) -> StoreResult<OrderRecord> {
        update_in(&mut self.orders.write(), record)
    }
}
