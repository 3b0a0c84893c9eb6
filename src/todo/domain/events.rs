//! Domain events emitted by the todo aggregate.
//!
//! Events are owned by the aggregate until the orchestrating service has
//! dispatched them. Each carries the aggregate identifier, the time it
//! occurred, and a kind-specific payload.

use super::{DueDate, Priority, TaskStatus, TaskTitle, TodoId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Field changed by a [`TodoEventPayload::Updated`] event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoField {
    /// The title.
    Title,
    /// The free-text description.
    Description,
    /// The priority.
    Priority,
    /// The optional due date.
    DueDate,
    /// The lifecycle status.
    Status,
}

/// Discriminant of a todo event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoEventKind {
    /// A todo was created.
    Created,
    /// A single field of a todo changed.
    Updated,
    /// A todo was completed.
    Completed,
    /// A closed todo returned to pending.
    Reopened,
    /// A todo was removed from storage.
    Deleted,
}

impl TodoEventKind {
    /// Returns the published event type name.
    #[must_use]
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::Created => "TodoCreated",
            Self::Updated => "TodoUpdated",
            Self::Completed => "TodoCompleted",
            Self::Reopened => "TodoReopened",
            Self::Deleted => "TodoDeleted",
        }
    }
}

/// Kind-specific event data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TodoEventPayload {
    /// Initial state of a new todo.
    Created {
        /// Title at creation.
        title: TaskTitle,
        /// Description at creation.
        description: String,
        /// Priority at creation.
        priority: Priority,
        /// Due date at creation, if any.
        due_date: Option<DueDate>,
    },
    /// One field changed.
    Updated {
        /// The field that changed.
        field: TodoField,
    },
    /// The todo was completed.
    Completed {
        /// Completion timestamp recorded on the aggregate.
        completed_at: DateTime<Utc>,
    },
    /// The todo was reopened.
    Reopened {
        /// Status held before reopening.
        previous_status: TaskStatus,
    },
    /// The todo was deleted.
    Deleted,
}

impl TodoEventPayload {
    /// Returns the payload discriminant.
    #[must_use]
    pub const fn kind(&self) -> TodoEventKind {
        match self {
            Self::Created { .. } => TodoEventKind::Created,
            Self::Updated { .. } => TodoEventKind::Updated,
            Self::Completed { .. } => TodoEventKind::Completed,
            Self::Reopened { .. } => TodoEventKind::Reopened,
            Self::Deleted => TodoEventKind::Deleted,
        }
    }
}

/// Immutable record of a todo state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoEvent {
    todo_id: TodoId,
    occurred_at: DateTime<Utc>,
    #[serde(flatten)]
    payload: TodoEventPayload,
}

impl TodoEvent {
    /// Creates an event for `todo_id` that occurred at `occurred_at`.
    #[must_use]
    pub const fn new(
        todo_id: TodoId,
        occurred_at: DateTime<Utc>,
        payload: TodoEventPayload,
    ) -> Self {
        Self {
            todo_id,
            occurred_at,
            payload,
        }
    }

    /// Creates the event announcing that a todo was removed from storage.
    #[must_use]
    pub fn deleted(todo_id: TodoId, clock: &impl Clock) -> Self {
        Self::new(todo_id, clock.utc(), TodoEventPayload::Deleted)
    }

    /// Returns the identifier of the aggregate that emitted the event.
    #[must_use]
    pub const fn todo_id(&self) -> TodoId {
        self.todo_id
    }

    /// Returns when the event occurred.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Returns the kind-specific payload.
    #[must_use]
    pub const fn payload(&self) -> &TodoEventPayload {
        &self.payload
    }

    /// Returns the event discriminant.
    #[must_use]
    pub const fn kind(&self) -> TodoEventKind {
        self.payload.kind()
    }

    /// Returns the published event type name, such as `TodoCreated`.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        self.kind().event_type()
    }
}
