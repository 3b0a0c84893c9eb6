//! Event dispatcher that publishes todo events to the log.

use async_trait::async_trait;
use tracing::{error, info};

use crate::todo::{
    domain::TodoEvent,
    ports::{EventDispatchResult, EventDispatcher},
};

/// Dispatcher that writes each event as a structured `tracing` record.
///
/// Stands in for a message broker. Events that cannot be serialized are
/// logged at error level and skipped; the call itself never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventDispatcher;

impl TracingEventDispatcher {
    /// Creates a tracing dispatcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventDispatcher for TracingEventDispatcher {
    async fn dispatch(&self, events: &[TodoEvent]) -> EventDispatchResult<()> {
        for event in events {
            match serde_json::to_string(event) {
                Ok(event_data) => info!(
                    event_type = event.event_type(),
                    aggregate_id = %event.todo_id(),
                    occurred_at = %event.occurred_at(),
                    event_data = %event_data,
                    "domain event dispatched"
                ),
                Err(err) => error!(
                    event_type = event.event_type(),
                    aggregate_id = %event.todo_id(),
                    error = %err,
                    "failed to serialize domain event"
                ),
            }
        }
        Ok(())
    }
}
