//! Binding between a durable order record and one workflow instance.

use crate::core::State;
use crate::engine::{InvalidStateError, Workflow};
use crate::order::error::{OrderError, OrderResult};
use crate::order::record::{OrderRecord, OrderSnapshot};
use crate::order::states::{OrderEvent, OrderState};
use crate::order::workflow::{OrderDefinition, OrderWorkflow};
use crate::store::OrderStore;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// An order materialized in memory.
///
/// The state field only changes through [`advance`](Self::advance). The
/// workflow instance is built from the record on first use and cached for
/// the lifetime of this value; it is not re-read from storage until
/// [`reload`](Self::reload) is called.
pub struct Order {
    record: OrderRecord,
    definition: Arc<OrderDefinition>,
    workflow: Option<OrderWorkflow>,
    persisted: bool,
}

impl Order {
    /// New, unsaved order owned by `user_id`, in state `created`.
    pub fn new(user_id: i64, definition: Arc<OrderDefinition>) -> Self {
        let mut order = Self {
            record: OrderRecord::new(user_id),
            definition,
            workflow: None,
            persisted: false,
        };
        order.ensure_initial_state();
        order
    }

    /// Order loaded from storage.
    pub fn from_record(record: OrderRecord, definition: Arc<OrderDefinition>) -> Self {
        let mut order = Self {
            record,
            definition,
            workflow: None,
            persisted: true,
        };
        order.ensure_initial_state();
        order
    }

    /// Fill an empty state field with `created`.
    fn ensure_initial_state(&mut self) {
        if self.record.state.trim().is_empty() {
            self.record.state = OrderState::default().name().to_string();
        }
    }

    pub fn id(&self) -> Uuid {
        self.record.id
    }

    pub fn user_id(&self) -> i64 {
        self.record.user_id
    }

    pub fn record(&self) -> &OrderRecord {
        &self.record
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot::from(&self.record)
    }

    /// State field parsed as an [`OrderState`].
    pub fn state(&self) -> Result<OrderState, InvalidStateError> {
        self.record
            .state
            .parse()
            .map_err(|_| InvalidStateError {
                state: self.record.state.clone(),
            })
    }

    /// The cached workflow, built from the state field on first access.
    pub fn workflow(&mut self) -> Result<&mut OrderWorkflow, InvalidStateError> {
        let workflow = match self.workflow.take() {
            Some(workflow) => workflow,
            None => Workflow::initialize(Arc::clone(&self.definition), self.state()?)?,
        };
        Ok(self.workflow.insert(workflow))
    }

    /// Trigger `event` and persist the resulting state.
    ///
    /// An illegal event returns [`OrderError::Transition`] and changes
    /// nothing. If the save fails after a successful transition, the
    /// in-memory state keeps the new value and [`OrderError::Persistence`]
    /// is returned; calling [`save`](Self::save) again retries the write.
    pub fn advance<St>(&mut self, event: OrderEvent, store: &St) -> OrderResult<&OrderRecord>
    where
        St: OrderStore + ?Sized,
    {
        let from = self.record.state.clone();
        let to = *self.workflow()?.trigger(&event)?;
        self.record.state = to.name().to_string();

        info!(
            order_id = %self.record.id,
            event = %event,
            from = %from,
            to = %to,
            "Order transitioned"
        );

        if let Err(source) = self.save(store) {
            warn!(order_id = %self.record.id, error = %source, "Order transition not saved");
            return Err(match source {
                OrderError::Storage(source) => OrderError::Persistence {
                    id: self.record.id,
                    state: self.record.state.clone(),
                    source,
                },
                other => other,
            });
        }

        Ok(&self.record)
    }

    /// Write the record: insert if never saved, otherwise a versioned update.
    pub fn save<St>(&mut self, store: &St) -> OrderResult<()>
    where
        St: OrderStore + ?Sized,
    {
        let saved = if self.persisted {
            store.update(self.record.clone())
        } else {
            store.insert(self.record.clone())
        }
        .map_err(OrderError::Storage)?;

        self.record = saved;
        self.persisted = true;
        Ok(())
    }

    /// Re-read the record from storage and drop the cached workflow.
    pub fn reload<St>(&mut self, store: &St) -> OrderResult<()>
    where
        St: OrderStore + ?Sized,
    {
        self.record = store.find(self.record.id)?;
        self.persisted = true;
        self.workflow = None;
        self.ensure_initial_state();
        Ok(())
    }
}

impl std::fmt::Debug for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Order")
            .field("record", &self.record)
            .field("persisted", &self.persisted)
            .field("workflow", &self.workflow)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{HookError, TransitionError};
    use crate::order::notifier::OrderNotifier;
    use crate::order::workflow::{default_order_definition, order_definition};
    use crate::store::{MemoryStore, StoreError, StoreResult};

    fn definition() -> Arc<OrderDefinition> {
        default_order_definition().unwrap()
    }

    /// Store that accepts inserts but rejects every update.
    #[derive(Default)]
    struct ReadOnlyAfterInsert {
        inner: MemoryStore,
    }

    impl OrderStore for ReadOnlyAfterInsert {
        fn insert(&self, record: OrderRecord) -> StoreResult<OrderRecord> {
            self.inner.insert(record)
        }

        fn find(&self, id: Uuid) -> StoreResult<OrderRecord> {
            self.inner.find(id)
        }

        fn list(&self) -> StoreResult<Vec<OrderRecord>> {
            self.inner.list()
        }

        fn update(&self, _record: OrderRecord) -> StoreResult<OrderRecord> {
            Err(StoreError::Serialization("validation failed".to_string()))
        }
    }

    /// Notifier that refuses every event.
    struct RejectingNotifier;

    impl OrderNotifier for RejectingNotifier {
        fn notify(&self, _event: OrderEvent, _message: &str) -> Result<(), HookError> {
            Err(HookError::new("support queue unavailable"))
        }
    }

    #[test]
    fn new_order_starts_created() {
        let order = Order::new(1, definition());

        assert_eq!(order.user_id(), 1);
        assert_eq!(order.record().state, "created");
        assert_eq!(order.state().unwrap(), OrderState::Created);
        assert!(!order.is_persisted());
    }

    #[test]
    fn loaded_record_without_state_is_created() {
        let record = OrderRecord::new(9);

        let order = Order::from_record(record, definition());

        assert_eq!(order.state().unwrap(), OrderState::Created);
    }

    #[test]
    fn advance_persists_new_state() {
        let store = MemoryStore::new();
        let mut order = Order::new(1, definition());
        order.save(&store).unwrap();

        order.advance(OrderEvent::Process, &store).unwrap();

        assert_eq!(order.record().state, "processing");
        assert_eq!(store.find(order.id()).unwrap().state, "processing");
    }

    #[test]
    fn illegal_event_changes_nothing() {
        let store = MemoryStore::new();
        let mut order = Order::new(1, definition());
        order.save(&store).unwrap();
        let before = store.find(order.id()).unwrap();

        let err = order.advance(OrderEvent::Complete, &store).unwrap_err();

        assert!(matches!(
            err,
            OrderError::Transition(TransitionError::InvalidTransition { .. })
        ));
        assert_eq!(order.record().state, "created");
        assert_eq!(store.find(order.id()).unwrap(), before);
    }

    #[test]
    fn failing_hook_changes_nothing() {
        let store = MemoryStore::new();
        let definition = Arc::new(order_definition(Arc::new(RejectingNotifier)).unwrap());
        let mut order = Order::new(1, definition);
        order.save(&store).unwrap();
        let before = store.find(order.id()).unwrap();

        let err = order.advance(OrderEvent::Process, &store).unwrap_err();

        match err {
            OrderError::Transition(TransitionError::HookFailed { event, source }) => {
                assert_eq!(event, "process");
                assert_eq!(source.message(), "support queue unavailable");
            }
            other => panic!("Expected HookFailed, got {other:?}"),
        }
        assert_eq!(order.record().state, "created");
        assert_eq!(order.workflow().unwrap().state(), &OrderState::Created);
        assert_eq!(store.find(order.id()).unwrap(), before);
    }

    #[test]
    fn save_failure_keeps_in_memory_transition() {
        let store = ReadOnlyAfterInsert::default();
        let mut order = Order::new(1, definition());
        order.save(&store).unwrap();

        let err = order.advance(OrderEvent::Cancel, &store).unwrap_err();

        assert!(matches!(err, OrderError::Persistence { ref state, .. } if state == "canceled"));
        assert!(err.is_retryable());
        assert_eq!(order.state().unwrap(), OrderState::Canceled);
        assert_eq!(order.workflow().unwrap().state(), &OrderState::Canceled);
        assert_eq!(store.find(order.id()).unwrap().state, "created");
    }

    #[test]
    fn corrupted_state_fails_fast() {
        let mut record = OrderRecord::new(1);
        record.state = "shipped".to_string();
        let store = MemoryStore::new();
        let mut order = Order::from_record(record, definition());

        let err = order.advance(OrderEvent::Process, &store).unwrap_err();

        assert!(matches!(err, OrderError::InvalidState(ref e) if e.state == "shipped"));
    }

    #[test]
    fn cached_workflow_ignores_out_of_band_writes_until_reload() {
        let store = MemoryStore::new();
        let mut order = Order::new(1, definition());
        order.save(&store).unwrap();
        assert_eq!(order.workflow().unwrap().state(), &OrderState::Created);

        let mut other = Order::from_record(store.find(order.id()).unwrap(), definition());
        other.advance(OrderEvent::Cancel, &store).unwrap();

        assert_eq!(order.workflow().unwrap().state(), &OrderState::Created);

        order.reload(&store).unwrap();
        assert_eq!(order.workflow().unwrap().state(), &OrderState::Canceled);
    }

    #[test]
    fn stale_write_is_reported_as_persistence_conflict() {
        let store = MemoryStore::new();
        let mut first = Order::new(1, definition());
        first.save(&store).unwrap();
        let mut second = Order::from_record(store.find(first.id()).unwrap(), definition());

        first.advance(OrderEvent::Process, &store).unwrap();
        let err = second.advance(OrderEvent::Cancel, &store).unwrap_err();

        assert!(matches!(
            err,
            OrderError::Persistence {
                source: StoreError::Conflict { .. },
                ..
            }
        ));
        assert_eq!(store.find(first.id()).unwrap().state, "processing");
    }
}
