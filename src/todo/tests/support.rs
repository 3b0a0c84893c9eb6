//! Shared fixtures for todo unit tests.

use crate::todo::domain::{DueDate, Priority, TaskTitle, Todo};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex, PoisonError};

/// Clock pinned to a settable instant.
#[derive(Debug, Clone)]
pub struct StubClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl StubClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for StubClock {
    fn default() -> Self {
        Self::at(epoch())
    }
}

impl Clock for StubClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fixed instant used as "now" by default.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

pub fn title(value: &str) -> TaskTitle {
    TaskTitle::new(value).expect("valid title")
}

/// Pending todo with no due date and an empty event queue.
pub fn pending_todo(clock: &StubClock) -> Todo {
    let mut todo = Todo::new(title("Test todo"), "Test description", Priority::Medium, None, clock);
    todo.clear_events();
    todo
}

/// Pending todo due `in_hours` from the clock's current time.
pub fn todo_due_in(clock: &StubClock, in_hours: i64) -> Todo {
    let due = DueDate::new(clock.utc() + Duration::hours(in_hours), clock).expect("future due");
    let mut todo = Todo::new(title("Due todo"), "", Priority::High, Some(due), clock);
    todo.clear_events();
    todo
}
