//! Validated todo title.

use super::TodoDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed todo title of at most [`TaskTitle::MAX_LENGTH`]
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Maximum title length in characters, measured after trimming.
    pub const MAX_LENGTH: usize = 200;

    /// Creates a validated title.
    ///
    /// Surrounding whitespace is removed before the length checks, so a
    /// whitespace-only value is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyTitle`] or
    /// [`TodoDomainError::TitleTooLong`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, TodoDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TodoDomainError::EmptyTitle);
        }

        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(TodoDomainError::TitleTooLong {
                length,
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TodoDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(title: TaskTitle) -> Self {
        title.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
