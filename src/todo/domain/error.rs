//! Error types for todo domain validation and business rules.

use super::{TaskStatus, TodoId};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Broad classification of a [`TodoDomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoErrorKind {
    /// Malformed or out-of-range input.
    Validation,
    /// Well-formed input that violates a state-machine invariant.
    BusinessRule,
}

/// Errors returned while constructing or mutating domain todo values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The identifier is not a canonical UUID string.
    #[error("invalid todo ID: '{0}'")]
    InvalidId(String),

    /// The title is empty after trimming.
    #[error("title: cannot be empty")]
    EmptyTitle,

    /// The title exceeds the maximum length after trimming.
    #[error("title: cannot exceed {max} characters (got {length})")]
    TitleTooLong {
        /// Length of the trimmed title in characters.
        length: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// A string did not match any canonical enumeration value.
    #[error("{field}: invalid enum value '{value}'")]
    InvalidEnumValue {
        /// Field being parsed.
        field: &'static str,
        /// Rejected input.
        value: String,
    },

    /// The due date is not strictly after the current time.
    #[error("due_date: {due} must be after {now}")]
    DueDateNotInFuture {
        /// Requested due date.
        due: DateTime<Utc>,
        /// Time observed at validation.
        now: DateTime<Utc>,
    },

    /// A cancelled todo cannot be completed.
    #[error("cannot complete cancelled todo {0}")]
    CannotCompleteCancelled(TodoId),

    /// A completed todo cannot be modified.
    #[error("cannot modify completed todo {0}")]
    CannotModifyCompleted(TodoId),

    /// The requested status transition is not permitted.
    #[error("todo {todo_id}: cannot transition from {} to {}", from.as_str(), to.as_str())]
    InvalidStatusTransition {
        /// Todo whose transition was rejected.
        todo_id: TodoId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}

impl TodoDomainError {
    /// Returns whether the error is a validation or business-rule failure.
    #[must_use]
    pub const fn kind(&self) -> TodoErrorKind {
        match self {
            Self::InvalidId(_)
            | Self::EmptyTitle
            | Self::TitleTooLong { .. }
            | Self::InvalidEnumValue { .. }
            | Self::DueDateNotInFuture { .. } => TodoErrorKind::Validation,
            Self::CannotCompleteCancelled(_)
            | Self::CannotModifyCompleted(_)
            | Self::InvalidStatusTransition { .. } => TodoErrorKind::BusinessRule,
        }
    }

    /// Returns the offending input field for validation errors.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidId(_) => Some("id"),
            Self::EmptyTitle | Self::TitleTooLong { .. } => Some("title"),
            Self::InvalidEnumValue { field, .. } => Some(*field),
            Self::DueDateNotInFuture { .. } => Some("due_date"),
            Self::CannotCompleteCancelled(_)
            | Self::CannotModifyCompleted(_)
            | Self::InvalidStatusTransition { .. } => None,
        }
    }
}
