//! Diesel row models for todo persistence.

use super::schema::todos;
use crate::todo::domain::Todo;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for todo records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TodoRow {
    /// Todo identifier.
    pub id: uuid::Uuid,
    /// Trimmed title.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Canonical status string.
    pub status: String,
    /// Canonical priority string.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Insert model for todo records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todos)]
pub struct NewTodoRow {
    /// Todo identifier.
    pub id: uuid::Uuid,
    /// Trimmed title.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Canonical status string.
    pub status: String,
    /// Canonical priority string.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Full-row replacement for existing todo records.
///
/// `None` values are written as `NULL` so a cleared due date or completion
/// timestamp is persisted.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = todos)]
#[diesel(treat_none_as_null = true)]
pub struct TodoChangeset {
    /// Trimmed title.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Canonical status string.
    pub status: String,
    /// Canonical priority string.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Todo> for NewTodoRow {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id().into_inner(),
            title: todo.title().as_str().to_owned(),
            description: todo.description().to_owned(),
            status: todo.status().as_str().to_owned(),
            priority: todo.priority().as_str().to_owned(),
            due_date: todo.due_date().map(|due| due.value()),
            created_at: todo.created_at(),
            updated_at: todo.updated_at(),
            completed_at: todo.completed_at(),
        }
    }
}

impl From<&Todo> for TodoChangeset {
    fn from(todo: &Todo) -> Self {
        Self {
            title: todo.title().as_str().to_owned(),
            description: todo.description().to_owned(),
            status: todo.status().as_str().to_owned(),
            priority: todo.priority().as_str().to_owned(),
            due_date: todo.due_date().map(|due| due.value()),
            updated_at: todo.updated_at(),
            completed_at: todo.completed_at(),
        }
    }
}
