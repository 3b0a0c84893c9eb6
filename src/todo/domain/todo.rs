//! Todo aggregate root.

use super::{
    DueDate, Priority, TaskStatus, TaskTitle, TodoDomainError, TodoEvent, TodoEventPayload,
    TodoField, TodoId,
};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;

/// Todo aggregate root.
///
/// All mutation goes through the methods below. Each successful change
/// refreshes `updated_at` and appends an event to the pending queue, which
/// the orchestrator reads and clears once the events have been dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: TodoId,
    title: TaskTitle,
    description: String,
    status: TaskStatus,
    priority: Priority,
    due_date: Option<DueDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    pending_events: Vec<TodoEvent>,
}

/// Parameter object for reconstructing a persisted todo aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTodoData {
    /// Persisted todo identifier.
    pub id: TodoId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted due date, if any.
    pub due_date: Option<DueDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Creates a pending todo and records a `Created` event.
    #[must_use]
    pub fn new(
        title: TaskTitle,
        description: impl Into<String>,
        priority: Priority,
        due_date: Option<DueDate>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        let id = TodoId::new();
        let description_text = description.into();
        let created = TodoEvent::new(
            id,
            timestamp,
            TodoEventPayload::Created {
                title: title.clone(),
                description: description_text.clone(),
                priority,
                due_date,
            },
        );

        Self {
            id,
            title,
            description: description_text,
            status: TaskStatus::Pending,
            priority,
            due_date,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at: None,
            pending_events: vec![created],
        }
    }

    /// Reconstructs a todo from persisted storage with an empty event queue.
    #[must_use]
    pub fn from_persisted(data: PersistedTodoData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
            pending_events: Vec::new(),
        }
    }

    /// Returns the todo identifier.
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, which may be empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion timestamp. Set only while completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns events recorded since the queue was last cleared.
    #[must_use]
    pub fn pending_events(&self) -> &[TodoEvent] {
        &self.pending_events
    }

    /// Discards all pending events. Call only after they were dispatched.
    pub fn clear_events(&mut self) {
        self.pending_events.clear();
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::CannotModifyCompleted`] if the todo is
    /// completed.
    pub fn update_title(
        &mut self,
        title: TaskTitle,
        clock: &impl Clock,
    ) -> Result<(), TodoDomainError> {
        self.ensure_modifiable()?;
        self.title = title;
        self.record_update(TodoField::Title, clock);
        Ok(())
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::CannotModifyCompleted`] if the todo is
    /// completed.
    pub fn update_description(
        &mut self,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TodoDomainError> {
        self.ensure_modifiable()?;
        self.description = description.into();
        self.record_update(TodoField::Description, clock);
        Ok(())
    }

    /// Replaces the priority.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::CannotModifyCompleted`] if the todo is
    /// completed.
    pub fn update_priority(
        &mut self,
        priority: Priority,
        clock: &impl Clock,
    ) -> Result<(), TodoDomainError> {
        self.ensure_modifiable()?;
        self.priority = priority;
        self.record_update(TodoField::Priority, clock);
        Ok(())
    }

    /// Sets or clears the due date.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::CannotModifyCompleted`] if the todo is
    /// completed.
    pub fn update_due_date(
        &mut self,
        due_date: Option<DueDate>,
        clock: &impl Clock,
    ) -> Result<(), TodoDomainError> {
        self.ensure_modifiable()?;
        self.due_date = due_date;
        self.record_update(TodoField::DueDate, clock);
        Ok(())
    }

    /// Moves to `status` if the transition table permits it.
    ///
    /// Records a generic `Updated` event rather than the dedicated
    /// `Completed`/`Reopened` events, but keeps `completed_at` in step with
    /// the status.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidStatusTransition`] when the current
    /// status cannot move to `status`.
    pub fn update_status(
        &mut self,
        status: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TodoDomainError> {
        if !self.status.can_transition_to(status) {
            return Err(TodoDomainError::InvalidStatusTransition {
                todo_id: self.id,
                from: self.status,
                to: status,
            });
        }

        let now = self.now(clock);
        self.completed_at = status.is_completed().then_some(now);
        self.status = status;
        self.updated_at = now;
        self.push_event(now, TodoEventPayload::Updated {
            field: TodoField::Status,
        });
        Ok(())
    }

    /// Marks the todo completed.
    ///
    /// Completing an already completed todo is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::CannotCompleteCancelled`] if the todo is
    /// cancelled.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), TodoDomainError> {
        match self.status {
            TaskStatus::Cancelled => Err(TodoDomainError::CannotCompleteCancelled(self.id)),
            TaskStatus::Completed => Ok(()),
            TaskStatus::Pending | TaskStatus::InProgress => {
                let now = self.now(clock);
                self.status = TaskStatus::Completed;
                self.completed_at = Some(now);
                self.updated_at = now;
                self.push_event(now, TodoEventPayload::Completed { completed_at: now });
                Ok(())
            }
        }
    }

    /// Returns a completed or cancelled todo to pending.
    ///
    /// Reopening an open todo is a no-op.
    pub fn reopen(&mut self, clock: &impl Clock) {
        if !self.status.is_closed() {
            return;
        }

        let now = self.now(clock);
        let previous_status = self.status;
        self.status = TaskStatus::Pending;
        self.completed_at = None;
        self.updated_at = now;
        self.push_event(now, TodoEventPayload::Reopened { previous_status });
    }

    /// Marks the todo cancelled.
    ///
    /// Cancelling an already cancelled todo is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::CannotModifyCompleted`] if the todo is
    /// completed.
    pub fn cancel(&mut self, clock: &impl Clock) -> Result<(), TodoDomainError> {
        self.ensure_modifiable()?;
        if self.status.is_cancelled() {
            return Ok(());
        }
        self.status = TaskStatus::Cancelled;
        self.record_update(TodoField::Status, clock);
        Ok(())
    }

    /// Marks the todo in progress.
    ///
    /// Starting a todo that is already in progress is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::CannotModifyCompleted`] if the todo is
    /// completed.
    pub fn mark_in_progress(&mut self, clock: &impl Clock) -> Result<(), TodoDomainError> {
        self.ensure_modifiable()?;
        if self.status == TaskStatus::InProgress {
            return Ok(());
        }
        self.status = TaskStatus::InProgress;
        self.record_update(TodoField::Status, clock);
        Ok(())
    }

    /// Returns whether the due date has passed. False without a due date.
    #[must_use]
    pub fn is_due(&self, clock: &impl Clock) -> bool {
        self.due_date.is_some_and(|due| due.is_past(clock))
    }

    /// Returns whether the todo is due within `window`. False without a due
    /// date.
    #[must_use]
    pub fn is_due_soon(&self, window: Duration, clock: &impl Clock) -> bool {
        self.due_date.is_some_and(|due| due.is_approaching(window, clock))
    }

    const fn ensure_modifiable(&self) -> Result<(), TodoDomainError> {
        if self.status.is_completed() {
            return Err(TodoDomainError::CannotModifyCompleted(self.id));
        }
        Ok(())
    }

    /// Current time, never earlier than `created_at`.
    fn now(&self, clock: &impl Clock) -> DateTime<Utc> {
        clock.utc().max(self.created_at)
    }

    fn record_update(&mut self, field: TodoField, clock: &impl Clock) {
        let now = self.now(clock);
        self.updated_at = now;
        self.push_event(now, TodoEventPayload::Updated { field });
    }

    fn push_event(&mut self, occurred_at: DateTime<Utc>, payload: TodoEventPayload) {
        self.pending_events.push(TodoEvent::new(self.id, occurred_at, payload));
    }
}
