//! Event dispatcher port for publishing todo domain events.

use crate::todo::domain::TodoEvent;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event dispatch operations.
pub type EventDispatchResult<T> = Result<T, EventDispatchError>;

/// Publishes domain events to interested subscribers.
///
/// Delivery is at-least-once. Implementations must preserve the order of
/// `events` within a single call; no ordering is promised across calls.
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    /// Publishes `events` in order.
    ///
    /// # Errors
    ///
    /// Returns [`EventDispatchError`] when the events could not be handed to
    /// the delivery mechanism.
    async fn dispatch(&self, events: &[TodoEvent]) -> EventDispatchResult<()>;
}

/// Errors returned by event dispatcher implementations.
#[derive(Debug, Clone, Error)]
pub enum EventDispatchError {
    /// The delivery mechanism refused the events.
    #[error("event dispatcher unavailable: {0}")]
    Unavailable(String),

    /// Transport-layer failure.
    #[error("event transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl EventDispatchError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
