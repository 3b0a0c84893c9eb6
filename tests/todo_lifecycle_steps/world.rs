//! Shared world state for todo lifecycle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use todo_core::todo::{
    adapters::memory::{InMemoryEventDispatcher, InMemoryTodoRepository},
    services::{TodoResponse, TodoService, TodoServiceError},
};

/// Service type used by the BDD world.
pub type TestTodoService = TodoService<InMemoryTodoRepository, InMemoryEventDispatcher, DefaultClock>;

/// Scenario world for todo lifecycle behaviour tests.
pub struct TodoLifecycleWorld {
    pub service: TestTodoService,
    pub repository: InMemoryTodoRepository,
    pub dispatcher: InMemoryEventDispatcher,
    pub current_todo: Option<TodoResponse>,
    pub last_result: Option<Result<TodoResponse, TodoServiceError>>,
}

impl TodoLifecycleWorld {
    /// Creates a world over empty in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let repository = InMemoryTodoRepository::new();
        let dispatcher = InMemoryEventDispatcher::new();
        let service = TodoService::new(
            Arc::new(repository.clone()),
            Arc::new(dispatcher.clone()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            repository,
            dispatcher,
            current_todo: None,
            last_result: None,
        }
    }

    /// Records a use-case result, tracking the todo on success.
    pub fn record(&mut self, result: Result<TodoResponse, TodoServiceError>) {
        if let Ok(ref todo) = result {
            self.current_todo = Some(todo.clone());
        }
        self.last_result = Some(result);
    }

    /// Returns the identifier of the todo under test.
    ///
    /// # Errors
    ///
    /// Returns an error if no todo has been created in this scenario.
    pub fn current_id(&self) -> Result<String, eyre::Report> {
        self.current_todo
            .as_ref()
            .map(|todo| todo.id.clone())
            .ok_or_else(|| eyre::eyre!("missing current todo in scenario world"))
    }
}

impl Default for TodoLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TodoLifecycleWorld {
    TodoLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
