//! Repository port for todo persistence and lookup.

use crate::todo::domain::{Priority, TaskStatus, Todo, TodoId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for todo repository operations.
pub type TodoRepositoryResult<T> = Result<T, TodoRepositoryError>;

/// Filters applied by [`TodoRepository::find_all`].
///
/// Results are ordered newest-created first. `offset` and `limit` apply
/// after filtering and ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Only return todos with this status.
    pub status: Option<TaskStatus>,
    /// Only return todos with this priority.
    pub priority: Option<Priority>,
    /// Maximum number of todos to return.
    pub limit: Option<u32>,
    /// Number of matching todos to skip.
    pub offset: Option<u32>,
}

impl TodoFilter {
    /// Creates a filter matching every todo.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: None,
            priority: None,
            limit: None,
            offset: None,
        }
    }

    /// Restricts results to `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results to `priority`.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the page window.
    #[must_use]
    pub const fn with_page(mut self, limit: Option<u32>, offset: Option<u32>) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    /// Returns whether `todo` passes the status and priority filters.
    #[must_use]
    pub fn matches(&self, todo: &Todo) -> bool {
        self.status.is_none_or(|status| todo.status() == status)
            && self.priority.is_none_or(|priority| todo.priority() == priority)
    }
}

/// Todo persistence contract.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Stores a new todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::DuplicateTodo`] when the todo ID
    /// already exists.
    async fn save(&self, todo: &Todo) -> TodoRepositoryResult<()>;

    /// Finds a todo by identifier.
    ///
    /// Returns `None` when the todo does not exist.
    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>>;

    /// Returns todos matching `filter`, newest-created first.
    async fn find_all(&self, filter: &TodoFilter) -> TodoRepositoryResult<Vec<Todo>>;

    /// Replaces the stored state of an existing todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when no stored todo has the
    /// same identifier.
    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<()>;

    /// Removes a todo by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when the todo does not exist.
    async fn delete(&self, id: TodoId) -> TodoRepositoryResult<()>;
}

/// Errors returned by todo repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoRepositoryError {
    /// A todo with the same identifier already exists.
    #[error("duplicate todo identifier: {0}")]
    DuplicateTodo(TodoId),

    /// The todo was not found.
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
