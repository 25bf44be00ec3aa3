//! Order lifecycle states and the events that move between them.

crate::state_enum! {
    /// Phase of an order's lifecycle.
    ///
    /// `Completed`, `Failed` and `Canceled` have no outgoing transitions in
    /// the order workflow.
    pub enum OrderState {
        Created => "created",
        Processing => "processing",
        Completed => "completed",
        Failed => "failed",
        Canceled => "canceled",
    }
    final: [Completed, Failed, Canceled]
    error: [Failed]
}

crate::event_enum! {
    /// Named trigger a caller can send to an order.
    pub enum OrderEvent {
        Process => "process",
        Complete => "complete",
        Fail => "fail",
        Cancel => "cancel",
    }
}

impl Default for OrderState {
    fn default() -> Self {
        Self::Created
    }
}
