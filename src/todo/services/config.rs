//! Configuration for the todo application service.

use chrono::Duration;

/// Tunable behaviour of [`super::TodoService`].
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use todo_core::todo::services::TodoServiceConfig;
///
/// let config = TodoServiceConfig::default();
/// assert_eq!(config.due_soon_window, Duration::hours(24));
/// assert_eq!(config.max_page_size, Some(100));
///
/// let unbounded = TodoServiceConfig::unbounded();
/// assert!(unbounded.max_page_size.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoServiceConfig {
    /// How far ahead a due date counts as "due soon" in responses.
    pub due_soon_window: Duration,
    /// Upper bound applied to a requested list limit.
    pub max_page_size: Option<u32>,
}

impl Default for TodoServiceConfig {
    fn default() -> Self {
        Self {
            due_soon_window: Duration::hours(24),
            max_page_size: Some(100),
        }
    }
}

impl TodoServiceConfig {
    /// Creates a configuration that never clamps list limits.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            max_page_size: None,
            ..Self::default()
        }
    }

    /// Sets the due-soon window.
    #[must_use]
    pub const fn with_due_soon_window(mut self, window: Duration) -> Self {
        self.due_soon_window = window;
        self
    }

    /// Sets the maximum page size.
    #[must_use]
    pub const fn with_max_page_size(mut self, max_page_size: Option<u32>) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    /// Applies the page-size bound to a requested limit.
    ///
    /// A missing limit stays missing.
    #[must_use]
    pub fn clamp_limit(&self, requested: Option<u32>) -> Option<u32> {
        match (requested, self.max_page_size) {
            (Some(limit), Some(max)) => Some(limit.min(max)),
            (limit, _) => limit,
        }
    }
}
