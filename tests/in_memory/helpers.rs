//! Shared test helpers for in-memory integration tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::{Arc, Mutex, PoisonError};
use todo_core::todo::{
    adapters::memory::{InMemoryEventDispatcher, InMemoryTodoRepository},
    services::TodoService,
};

/// Clock that only moves when a test advances it.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock reading `now`.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) += by;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Service wired to in-memory adapters.
pub type InMemoryService = TodoService<InMemoryTodoRepository, InMemoryEventDispatcher, ManualClock>;

/// Service together with handles on its adapters.
pub struct Fixture {
    pub service: InMemoryService,
    pub repository: InMemoryTodoRepository,
    pub dispatcher: InMemoryEventDispatcher,
    pub clock: ManualClock,
}

/// Fixed starting instant for integration scenarios.
pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// Provides a service over fresh in-memory adapters.
#[fixture]
pub fn fixture() -> Fixture {
    let repository = InMemoryTodoRepository::new();
    let dispatcher = InMemoryEventDispatcher::new();
    let clock = ManualClock::starting_at(start());
    let service = TodoService::new(
        Arc::new(repository.clone()),
        Arc::new(dispatcher.clone()),
        Arc::new(clock.clone()),
    );
    Fixture {
        service,
        repository,
        dispatcher,
        clock,
    }
}
