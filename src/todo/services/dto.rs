//! Request and response payloads for the todo use cases.

use crate::todo::domain::Todo;
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::Serialize;

/// Request payload for creating a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodoRequest {
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) priority: Option<String>,
    pub(crate) due_date: Option<DateTime<Utc>>,
}

impl CreateTodoRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority from its canonical string.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Requested change to the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DueDateChange {
    Set(DateTime<Utc>),
    Clear,
}

/// Request payload for updating a todo. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTodoRequest {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) priority: Option<String>,
    pub(crate) due_date: Option<DueDateChange>,
    pub(crate) status: Option<String>,
}

impl UpdateTodoRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets a new due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(DueDateChange::Set(due_date));
        self
    }

    /// Removes the due date.
    #[must_use]
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(DueDateChange::Clear);
        self
    }

    /// Moves to a new status through the transition table.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns whether the request changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
    }
}

/// Filters for listing todos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTodosRequest {
    pub(crate) status: Option<String>,
    pub(crate) priority: Option<String>,
    pub(crate) limit: Option<u32>,
    pub(crate) offset: Option<u32>,
}

impl ListTodosRequest {
    /// Creates a request listing every todo.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only list todos with this status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Only list todos with this priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Returns at most `limit` todos.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips the first `offset` matching todos.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Externally visible representation of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoResponse {
    /// Canonical identifier string.
    pub id: String,
    /// Title.
    pub title: String,
    /// Description, possibly empty.
    pub description: String,
    /// Canonical status string.
    pub status: String,
    /// Canonical priority string.
    pub priority: String,
    /// Due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp, present only while completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Whether the due date has passed.
    pub is_overdue: bool,
    /// Whether the due date falls within the configured window.
    pub is_due_soon: bool,
}

impl TodoResponse {
    /// Maps an aggregate to its response, evaluating due-date flags at
    /// `clock.utc()`.
    #[must_use]
    pub fn from_todo(todo: &Todo, due_soon_window: Duration, clock: &impl Clock) -> Self {
        Self {
            id: todo.id().to_string(),
            title: todo.title().as_str().to_owned(),
            description: todo.description().to_owned(),
            status: todo.status().as_str().to_owned(),
            priority: todo.priority().as_str().to_owned(),
            due_date: todo.due_date().map(|due| due.value()),
            created_at: todo.created_at(),
            updated_at: todo.updated_at(),
            completed_at: todo.completed_at(),
            is_overdue: todo.is_due(clock),
            is_due_soon: todo.is_due_soon(due_soon_window, clock),
        }
    }
}

/// One page of listed todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoPage {
    /// Todos in repository order.
    pub todos: Vec<TodoResponse>,
    /// Number of todos in this page.
    pub total_count: usize,
}
