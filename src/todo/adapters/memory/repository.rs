//! In-memory repository for todo tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::todo::{
    domain::{Todo, TodoId},
    ports::{TodoFilter, TodoRepository, TodoRepositoryError, TodoRepositoryResult},
};

/// Thread-safe in-memory todo repository.
///
/// Stored aggregates never carry pending events.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<HashMap<TodoId, Todo>>>,
}

impl InMemoryTodoRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored todos.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::Persistence`] if the lock is poisoned.
    pub fn len(&self) -> TodoRepositoryResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns whether the repository holds no todos.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::Persistence`] if the lock is poisoned.
    pub fn is_empty(&self) -> TodoRepositoryResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> TodoRepositoryResult<RwLockReadGuard<'_, HashMap<TodoId, Todo>>> {
        self.todos.read().map_err(|err| {
            TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TodoRepositoryResult<RwLockWriteGuard<'_, HashMap<TodoId, Todo>>> {
        self.todos.write().map_err(|err| {
            TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Copies an aggregate for storage without its pending events.
fn stored_copy(todo: &Todo) -> Todo {
    let mut copy = todo.clone();
    copy.clear_events();
    copy
}

fn to_usize(value: Option<u32>) -> Option<usize> {
    value.and_then(|raw| usize::try_from(raw).ok())
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn save(&self, todo: &Todo) -> TodoRepositoryResult<()> {
        let mut todos = self.write()?;
        if todos.contains_key(&todo.id()) {
            return Err(TodoRepositoryError::DuplicateTodo(todo.id()));
        }
        todos.insert(todo.id(), stored_copy(todo));
        Ok(())
    }

    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn find_all(&self, filter: &TodoFilter) -> TodoRepositoryResult<Vec<Todo>> {
        let todos = self.read()?;
        let mut matching: Vec<Todo> = todos
            .values()
            .filter(|todo| filter.matches(todo))
            .cloned()
            .collect();
        matching.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| left.id().cmp(&right.id()))
        });

        let offset = to_usize(filter.offset).unwrap_or(0);
        let limit = to_usize(filter.limit).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }

    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<()> {
        let mut todos = self.write()?;
        let stored = todos
            .get_mut(&todo.id())
            .ok_or(TodoRepositoryError::NotFound(todo.id()))?;
        *stored = stored_copy(todo);
        Ok(())
    }

    async fn delete(&self, id: TodoId) -> TodoRepositoryResult<()> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or(TodoRepositoryError::NotFound(id))
    }
}
