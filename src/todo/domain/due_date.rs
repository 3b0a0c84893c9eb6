//! Due date value object.

use super::TodoDomainError;
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Point in time by which a todo should be finished.
///
/// Only checked against the clock at construction. A stored due date is
/// allowed to lapse into the past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(DateTime<Utc>);

impl DueDate {
    /// Creates a due date that must lie strictly after the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::DueDateNotInFuture`] when `value` is equal
    /// to or earlier than `clock.utc()`.
    pub fn new(value: DateTime<Utc>, clock: &impl Clock) -> Result<Self, TodoDomainError> {
        let now = clock.utc();
        if value <= now {
            return Err(TodoDomainError::DueDateNotInFuture { due: value, now });
        }
        Ok(Self(value))
    }

    /// Restores a due date from storage without checking it against the clock.
    #[must_use]
    pub const fn from_persisted(value: DateTime<Utc>) -> Self {
        Self(value)
    }

    /// Returns the wrapped timestamp.
    #[must_use]
    pub const fn value(self) -> DateTime<Utc> {
        self.0
    }

    /// Returns whether the due date has passed.
    #[must_use]
    pub fn is_past(self, clock: &impl Clock) -> bool {
        clock.utc() > self.0
    }

    /// Returns whether the due date falls within `window` from now.
    ///
    /// Past due dates are always within the window.
    #[must_use]
    pub fn is_approaching(self, window: Duration, clock: &impl Clock) -> bool {
        self.0.signed_duration_since(clock.utc()) <= window
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
