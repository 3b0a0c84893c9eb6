//! In-memory event dispatcher that records what it publishes.

use async_trait::async_trait;
use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicBool, Ordering},
};

use crate::todo::{
    domain::TodoEvent,
    ports::{EventDispatchError, EventDispatchResult, EventDispatcher},
};

/// Dispatcher that keeps every published event in memory, in order.
///
/// It can be switched into a failing mode to exercise the path where a
/// write succeeded but its events could not be published.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventDispatcher {
    published: Arc<Mutex<Vec<TodoEvent>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryEventDispatcher {
    /// Creates an empty dispatcher that accepts every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent calls fail (`true`) or succeed (`false`).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns a copy of every event published so far.
    ///
    /// # Errors
    ///
    /// Returns [`EventDispatchError::Unavailable`] if the lock is poisoned.
    pub fn published(&self) -> EventDispatchResult<Vec<TodoEvent>> {
        Ok(self.lock()?.clone())
    }

    /// Removes and returns every event published so far.
    ///
    /// # Errors
    ///
    /// Returns [`EventDispatchError::Unavailable`] if the lock is poisoned.
    pub fn drain(&self) -> EventDispatchResult<Vec<TodoEvent>> {
        Ok(std::mem::take(&mut *self.lock()?))
    }

    fn lock(&self) -> EventDispatchResult<MutexGuard<'_, Vec<TodoEvent>>> {
        self.published
            .lock()
            .map_err(|err| EventDispatchError::Unavailable(err.to_string()))
    }
}

#[async_trait]
impl EventDispatcher for InMemoryEventDispatcher {
    async fn dispatch(&self, events: &[TodoEvent]) -> EventDispatchResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(EventDispatchError::Unavailable(
                "in-memory dispatcher set to fail".to_owned(),
            ));
        }
        self.lock()?.extend_from_slice(events);
        Ok(())
    }
}
