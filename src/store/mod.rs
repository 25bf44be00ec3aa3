//! Durable storage for order records.
//!
//! The store is a plain CRUD collaborator: it knows nothing about the
//! workflow. Updates are compare-and-swap on `lock_version`, so a write
//! based on a stale read fails with [`StoreError::Conflict`] instead of
//! silently overwriting a newer transition.

mod error;
mod file;
mod memory;

pub use error::{StoreError, StoreResult};
pub use file::{FileStore, StoreFormat};
pub use memory::MemoryStore;

use crate::order::OrderRecord;
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

/// Storage backend for order records.
pub trait OrderStore: Send + Sync {
    /// Persist a record that has never been saved.
    fn insert(&self, record: OrderRecord) -> StoreResult<OrderRecord>;

    /// Load one record.
    fn find(&self, id: Uuid) -> StoreResult<OrderRecord>;

    /// Load every record, in no particular order.
    fn list(&self) -> StoreResult<Vec<OrderRecord>>;

    /// Overwrite a record if its `lock_version` still matches, returning
    /// the stored copy with the version bumped.
    fn update(&self, record: OrderRecord) -> StoreResult<OrderRecord>;
}

impl<T: OrderStore + ?Sized> OrderStore for Box<T> {
    fn insert(&self, record: OrderRecord) -> StoreResult<OrderRecord> {
        (**self).insert(record)
    }

    fn find(&self, id: Uuid) -> StoreResult<OrderRecord> {
        (**self).find(id)
    }

    fn list(&self) -> StoreResult<Vec<OrderRecord>> {
        (**self).list()
    }

    fn update(&self, record: OrderRecord) -> StoreResult<OrderRecord> {
        (**self).update(record)
    }
}

type Table = HashMap<Uuid, OrderRecord>;

fn insert_into(table: &mut Table, record: OrderRecord) -> StoreResult<OrderRecord> {
    if table.contains_key(&record.id) {
        return Err(StoreError::Duplicate { id: record.id });
    }
    table.insert(record.id, record.clone());
    Ok(record)
}

fn update_in(table: &mut Table, mut record: OrderRecord) -> StoreResult<OrderRecord> {
    let stored = table
        .get_mut(&record.id)
        .ok_or(StoreError::NotFound { id: record.id })?;

    if stored.lock_version != record.lock_version {
        return Err(StoreError::Conflict {
            id: record.id,
            expected: record.lock_version,
            found: stored.lock_version,
        });
    }

    record.lock_version += 1;
    record.updated_at = Utc::now();
    *stored = record.clone();
    Ok(record)
}
