//! Application service orchestrating the todo use cases.
//!
//! Every use case runs the same sequence: validate input into value objects,
//! load the aggregate when one is needed, apply the domain behaviour, persist
//! through [`TodoRepository`], dispatch pending events through
//! [`EventDispatcher`], clear the queue, and map the result.

use super::{
    TodoServiceConfig,
    dto::{
        CreateTodoRequest, DueDateChange, ListTodosRequest, TodoPage, TodoResponse,
        UpdateTodoRequest,
    },
};
use crate::todo::{
    domain::{
        DueDate, Priority, TaskStatus, TaskTitle, Todo, TodoDomainError, TodoErrorKind, TodoEvent,
        TodoId,
    },
    ports::{EventDispatchError, EventDispatcher, TodoFilter, TodoRepository, TodoRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Infrastructure failure underlying a [`TodoServiceError::Infrastructure`].
#[derive(Debug, Clone, Error)]
pub enum InfrastructureError {
    /// The repository failed.
    #[error(transparent)]
    Repository(#[from] TodoRepositoryError),
    /// Event dispatch failed.
    #[error(transparent)]
    Dispatch(#[from] EventDispatchError),
}

/// Service-level errors for todo use cases.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// Input failed validation.
    #[error(transparent)]
    InvalidInput(TodoDomainError),

    /// The operation violates a state-machine rule.
    #[error(transparent)]
    BusinessRule(TodoDomainError),

    /// No todo has the requested identifier.
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// Persistence or dispatch failed.
    #[error("{operation} failed: {source}")]
    Infrastructure {
        /// Step that failed, such as `save todo` or `dispatch events`.
        operation: &'static str,
        /// Underlying failure.
        #[source]
        source: InfrastructureError,
    },
}

impl TodoServiceError {
    /// Returns whether the change may already be durable.
    ///
    /// True only when event dispatch failed after the write succeeded.
    #[must_use]
    pub const fn is_possibly_applied(&self) -> bool {
        matches!(
            self,
            Self::Infrastructure {
                source: InfrastructureError::Dispatch(_),
                ..
            }
        )
    }

    fn repository(operation: &'static str, err: TodoRepositoryError) -> Self {
        match err {
            TodoRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Infrastructure {
                operation,
                source: other.into(),
            },
        }
    }
}

impl From<TodoDomainError> for TodoServiceError {
    fn from(err: TodoDomainError) -> Self {
        match err.kind() {
            TodoErrorKind::Validation => Self::InvalidInput(err),
            TodoErrorKind::BusinessRule => Self::BusinessRule(err),
        }
    }
}

/// Result type for todo service operations.
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Validated form of an [`UpdateTodoRequest`].
struct ValidatedUpdate {
    title: Option<TaskTitle>,
    description: Option<String>,
    priority: Option<Priority>,
    due_date: Option<Option<DueDate>>,
    status: Option<TaskStatus>,
}

/// Todo orchestration service.
pub struct TodoService<R, D, C>
where
    R: TodoRepository,
    D: EventDispatcher,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    dispatcher: Arc<D>,
    clock: Arc<C>,
    config: TodoServiceConfig,
}

impl<R, D, C> Clone for TodoService<R, D, C>
where
    R: TodoRepository,
    D: EventDispatcher,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            dispatcher: Arc::clone(&self.dispatcher),
            clock: Arc::clone(&self.clock),
            config: self.config,
        }
    }
}

impl<R, D, C> TodoService<R, D, C>
where
    R: TodoRepository,
    D: EventDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, dispatcher: Arc<D>, clock: Arc<C>) -> Self {
        Self::with_config(repository, dispatcher, clock, TodoServiceConfig::default())
    }

    /// Creates a service with an explicit configuration.
    #[must_use]
    pub const fn with_config(
        repository: Arc<R>,
        dispatcher: Arc<D>,
        clock: Arc<C>,
        config: TodoServiceConfig,
    ) -> Self {
        Self {
            repository,
            dispatcher,
            clock,
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &TodoServiceConfig {
        &self.config
    }

    /// Creates a todo.
    ///
    /// A missing or empty priority defaults to medium.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::InvalidInput`] before touching storage
    /// when any field is invalid, or [`TodoServiceError::Infrastructure`]
    /// when saving or dispatching fails.
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateTodoRequest) -> TodoServiceResult<TodoResponse> {
        let title = TaskTitle::new(&request.title)?;
        let priority = parse_priority_or_default(request.priority.as_deref())?;
        let due_date = request
            .due_date
            .map(|value| DueDate::new(value, &*self.clock))
            .transpose()?;

        let mut todo = Todo::new(
            title,
            request.description.unwrap_or_default(),
            priority,
            due_date,
            &*self.clock,
        );
        self.repository
            .save(&todo)
            .await
            .map_err(|err| TodoServiceError::repository("save todo", err))?;
        self.publish(&mut todo).await?;

        debug!(todo_id = %todo.id(), "todo created");
        Ok(self.respond(&todo))
    }

    /// Retrieves a todo by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::InvalidInput`] for a malformed identifier
    /// or [`TodoServiceError::NotFound`] when no todo matches.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> TodoServiceResult<TodoResponse> {
        let todo_id = TodoId::parse(id)?;
        let todo = self.load(todo_id).await?;
        Ok(self.respond(&todo))
    }

    /// Applies the supplied field changes to a todo.
    ///
    /// Every field is validated before the todo is loaded. Changes apply in
    /// the order title, description, priority, due date, status.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::InvalidInput`],
    /// [`TodoServiceError::NotFound`], [`TodoServiceError::BusinessRule`]
    /// (for example when the todo is completed), or
    /// [`TodoServiceError::Infrastructure`].
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: &str,
        request: UpdateTodoRequest,
    ) -> TodoServiceResult<TodoResponse> {
        let todo_id = TodoId::parse(id)?;
        let changes = self.validate_update(request)?;

        let mut todo = self.load(todo_id).await?;
        let clock = &*self.clock;
        if let Some(title) = changes.title {
            todo.update_title(title, clock)?;
        }
        if let Some(description) = changes.description {
            todo.update_description(description, clock)?;
        }
        if let Some(priority) = changes.priority {
            todo.update_priority(priority, clock)?;
        }
        if let Some(due_date) = changes.due_date {
            todo.update_due_date(due_date, clock)?;
        }
        if let Some(status) = changes.status {
            todo.update_status(status, clock)?;
        }

        self.persist_and_publish(&mut todo).await?;
        debug!(todo_id = %todo.id(), "todo updated");
        Ok(self.respond(&todo))
    }

    /// Marks a todo completed. Completing a completed todo changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::InvalidInput`],
    /// [`TodoServiceError::NotFound`], [`TodoServiceError::BusinessRule`]
    /// when the todo is cancelled, or [`TodoServiceError::Infrastructure`].
    #[instrument(skip(self))]
    pub async fn complete(&self, id: &str) -> TodoServiceResult<TodoResponse> {
        let todo_id = TodoId::parse(id)?;
        let mut todo = self.load(todo_id).await?;
        todo.complete(&*self.clock)?;
        self.persist_and_publish(&mut todo).await?;
        debug!(todo_id = %todo.id(), "todo completed");
        Ok(self.respond(&todo))
    }

    /// Returns a completed or cancelled todo to pending. Reopening an open
    /// todo changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::InvalidInput`],
    /// [`TodoServiceError::NotFound`], or
    /// [`TodoServiceError::Infrastructure`].
    #[instrument(skip(self))]
    pub async fn reopen(&self, id: &str) -> TodoServiceResult<TodoResponse> {
        let todo_id = TodoId::parse(id)?;
        let mut todo = self.load(todo_id).await?;
        todo.reopen(&*self.clock);
        self.persist_and_publish(&mut todo).await?;
        debug!(todo_id = %todo.id(), "todo reopened");
        Ok(self.respond(&todo))
    }

    /// Deletes a todo without loading it and publishes a `TodoDeleted`
    /// event.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::InvalidInput`],
    /// [`TodoServiceError::NotFound`], or
    /// [`TodoServiceError::Infrastructure`].
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> TodoServiceResult<()> {
        let todo_id = TodoId::parse(id)?;
        self.repository
            .delete(todo_id)
            .await
            .map_err(|err| TodoServiceError::repository("delete todo", err))?;

        let deleted = [TodoEvent::deleted(todo_id, &*self.clock)];
        self.dispatch(todo_id, &deleted).await?;
        debug!(%todo_id, "todo deleted");
        Ok(())
    }

    /// Lists todos matching the filters, newest-created first.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::InvalidInput`] for an unknown status or
    /// priority, or [`TodoServiceError::Infrastructure`] when the query
    /// fails.
    #[instrument(skip(self, request))]
    pub async fn list(&self, request: ListTodosRequest) -> TodoServiceResult<TodoPage> {
        let mut filter = TodoFilter::new().with_page(
            self.config.clamp_limit(request.limit),
            request.offset,
        );
        if let Some(status) = request.status.as_deref() {
            filter = filter.with_status(TaskStatus::try_from(status)?);
        }
        if let Some(priority) = request.priority.as_deref() {
            filter = filter.with_priority(Priority::try_from(priority)?);
        }

        let todos = self
            .repository
            .find_all(&filter)
            .await
            .map_err(|err| TodoServiceError::repository("list todos", err))?;
        let responses: Vec<TodoResponse> = todos.iter().map(|todo| self.respond(todo)).collect();
        Ok(TodoPage {
            total_count: responses.len(),
            todos: responses,
        })
    }

    fn validate_update(&self, request: UpdateTodoRequest) -> TodoServiceResult<ValidatedUpdate> {
        let title = request.title.as_deref().map(TaskTitle::new).transpose()?;
        let priority = request
            .priority
            .as_deref()
            .map(Priority::try_from)
            .transpose()?;
        let due_date = match request.due_date {
            Some(DueDateChange::Set(value)) => Some(Some(DueDate::new(value, &*self.clock)?)),
            Some(DueDateChange::Clear) => Some(None),
            None => None,
        };
        let status = request
            .status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()?;

        Ok(ValidatedUpdate {
            title,
            description: request.description,
            priority,
            due_date,
            status,
        })
    }

    async fn load(&self, id: TodoId) -> TodoServiceResult<Todo> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| TodoServiceError::repository("find todo", err))?
            .ok_or(TodoServiceError::NotFound(id))
    }

    async fn persist_and_publish(&self, todo: &mut Todo) -> TodoServiceResult<()> {
        self.repository
            .update(todo)
            .await
            .map_err(|err| TodoServiceError::repository("update todo", err))?;
        self.publish(todo).await
    }

    /// Dispatches the aggregate's pending events and clears them on success.
    async fn publish(&self, todo: &mut Todo) -> TodoServiceResult<()> {
        if todo.pending_events().is_empty() {
            return Ok(());
        }
        self.dispatch(todo.id(), todo.pending_events()).await?;
        todo.clear_events();
        Ok(())
    }

    async fn dispatch(&self, todo_id: TodoId, events: &[TodoEvent]) -> TodoServiceResult<()> {
        self.dispatcher.dispatch(events).await.map_err(|err| {
            warn!(
                %todo_id,
                event_count = events.len(),
                error = %err,
                "event dispatch failed after the change was persisted"
            );
            TodoServiceError::Infrastructure {
                operation: "dispatch events",
                source: err.into(),
            }
        })
    }

    fn respond(&self, todo: &Todo) -> TodoResponse {
        TodoResponse::from_todo(todo, self.config.due_soon_window, &*self.clock)
    }
}

fn parse_priority_or_default(value: Option<&str>) -> Result<Priority, TodoDomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(Priority::default()),
        Some(raw) => Priority::try_from(raw),
    }
}
