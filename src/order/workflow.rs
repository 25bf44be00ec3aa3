//! The order state machine.

use crate::builder::{ConfigurationErrors, WorkflowBuilder};
use crate::engine::{Workflow, WorkflowDefinition};
use crate::order::notifier::{event_message, OrderNotifier, TracingNotifier};
use crate::order::states::{OrderEvent, OrderState};
use std::sync::Arc;

pub type OrderDefinition = WorkflowDefinition<OrderState, OrderEvent>;
pub type OrderWorkflow = Workflow<OrderState, OrderEvent>;

/// Build the order workflow with hooks forwarding to `notifier`.
///
/// ```text
/// created --process--> processing --complete--> completed
///    |                     |
///    +--cancel--> canceled +--fail--> failed
/// ```
pub fn order_definition(
    notifier: Arc<dyn OrderNotifier>,
) -> Result<OrderDefinition, ConfigurationErrors> {
    let mut builder = WorkflowBuilder::new();
    for state in OrderState::ALL {
        builder = builder.declare_state(*state);
    }

    builder = builder
        .declare_transition(OrderEvent::Process, OrderState::Created, OrderState::Processing)
        .declare_transition(OrderEvent::Complete, OrderState::Processing, OrderState::Completed)
        .declare_transition(OrderEvent::Fail, OrderState::Processing, OrderState::Failed)
        .declare_transition(OrderEvent::Cancel, OrderState::Created, OrderState::Canceled);

    for event in OrderEvent::ALL.iter().copied() {
        let notifier = Arc::clone(&notifier);
        builder = builder.declare_hook(event, move |_| {
            notifier.notify(event, event_message(event))
        });
    }

    builder.build()
}

/// Order workflow whose hooks log through `tracing`.
pub fn default_order_definition() -> Result<Arc<OrderDefinition>, ConfigurationErrors> {
    order_definition(Arc::new(TracingNotifier)).map(Arc::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{HookError, TransitionError};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<(OrderEvent, String)>>,
    }

    impl OrderNotifier for RecordingNotifier {
        fn notify(&self, event: OrderEvent, message: &str) -> Result<(), HookError> {
            self.messages.lock().push((event, message.to_string()));
            Ok(())
        }
    }

    fn recorded() -> (Arc<RecordingNotifier>, OrderWorkflow) {
        let notifier = Arc::new(RecordingNotifier::default());
        let definition = order_definition(notifier.clone()).unwrap();
        let workflow = Workflow::initialize(Arc::new(definition), OrderState::Created).unwrap();
        (notifier, workflow)
    }

    #[test]
    fn declares_all_five_states() {
        let definition = default_order_definition().unwrap();
        assert_eq!(definition.states(), OrderState::ALL);
        assert_eq!(definition.transitions().len(), 4);
    }

    #[test]
    fn process_then_complete() {
        let (notifier, mut workflow) = recorded();

        workflow.trigger(&OrderEvent::Process).unwrap();
        workflow.trigger(&OrderEvent::Complete).unwrap();

        assert_eq!(workflow.state(), &OrderState::Completed);
        assert_eq!(
            *notifier.messages.lock(),
            vec![
                (OrderEvent::Process, "Order is being processed.".to_string()),
                (
                    OrderEvent::Complete,
                    "Order completed successfully!".to_string()
                ),
            ]
        );
    }

    #[test]
    fn process_then_fail_notifies_support() {
        let (notifier, mut workflow) = recorded();

        workflow.trigger(&OrderEvent::Process).unwrap();
        workflow.trigger(&OrderEvent::Fail).unwrap();

        assert_eq!(workflow.state(), &OrderState::Failed);
        assert_eq!(
            notifier.messages.lock().last().map(|(_, m)| m.clone()),
            Some("Order processing failed. Notifying support.".to_string())
        );
    }

    #[test]
    fn cancel_from_created() {
        let (notifier, mut workflow) = recorded();

        workflow.trigger(&OrderEvent::Cancel).unwrap();

        assert_eq!(workflow.state(), &OrderState::Canceled);
        assert_eq!(notifier.messages.lock().len(), 1);
    }

    #[test]
    fn complete_from_created_is_rejected_without_notification() {
        let (notifier, mut workflow) = recorded();

        let err = workflow.trigger(&OrderEvent::Complete).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Cannot transition from created using event complete"
        );
        assert!(matches!(err, TransitionError::InvalidTransition { .. }));
        assert!(notifier.messages.lock().is_empty());
    }

    #[test]
    fn terminal_states_accept_no_events() {
        let definition = default_order_definition().unwrap();
        for state in [
            OrderState::Completed,
            OrderState::Failed,
            OrderState::Canceled,
        ] {
            assert!(definition.available_events(&state).is_empty());
        }
    }
}
