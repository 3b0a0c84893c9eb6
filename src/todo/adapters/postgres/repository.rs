//! `PostgreSQL` repository implementation for todo storage.

use super::{
    models::{NewTodoRow, TodoChangeset, TodoRow},
    schema::todos,
};
use crate::todo::{
    domain::{DueDate, PersistedTodoData, Priority, TaskStatus, TaskTitle, Todo, TodoId},
    ports::{TodoFilter, TodoRepository, TodoRepositoryError, TodoRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by todo adapters.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed todo repository.
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: TodoPgPool,
}

impl PostgresTodoRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TodoRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TodoRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TodoRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TodoRepositoryError::persistence)?
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn save(&self, todo: &Todo) -> TodoRepositoryResult<()> {
        let todo_id = todo.id();
        let new_row = NewTodoRow::from(todo);

        self.run_blocking(move |connection| {
            diesel::insert_into(todos::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TodoRepositoryError::DuplicateTodo(todo_id)
                    }
                    _ => TodoRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        self.run_blocking(move |connection| {
            let row = todos::table
                .find(id.into_inner())
                .select(TodoRow::as_select())
                .first::<TodoRow>(connection)
                .optional()
                .map_err(TodoRepositoryError::persistence)?;
            row.map(row_to_todo).transpose()
        })
        .await
    }

    async fn find_all(&self, filter: &TodoFilter) -> TodoRepositoryResult<Vec<Todo>> {
        let lookup = *filter;
        self.run_blocking(move |connection| {
            let mut query = todos::table.select(TodoRow::as_select()).into_boxed();
            if let Some(status) = lookup.status {
                query = query.filter(todos::status.eq(status.as_str()));
            }
            if let Some(priority) = lookup.priority {
                query = query.filter(todos::priority.eq(priority.as_str()));
            }
            query = query.order((todos::created_at.desc(), todos::id.asc()));
            if let Some(limit) = lookup.limit {
                query = query.limit(i64::from(limit));
            }
            if let Some(offset) = lookup.offset {
                query = query.offset(i64::from(offset));
            }

            let rows = query
                .load::<TodoRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows.into_iter().map(row_to_todo).collect()
        })
        .await
    }

    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<()> {
        let todo_id = todo.id();
        let changeset = TodoChangeset::from(todo);

        self.run_blocking(move |connection| {
            let affected = diesel::update(todos::table.find(todo_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TodoRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TodoRepositoryError::NotFound(todo_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TodoId) -> TodoRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(todos::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TodoRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TodoRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn row_to_todo(row: TodoRow) -> TodoRepositoryResult<Todo> {
    let TodoRow {
        id,
        title: persisted_title,
        description,
        status: persisted_status,
        priority: persisted_priority,
        due_date,
        created_at,
        updated_at,
        completed_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TodoRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TodoRepositoryError::persistence)?;
    let priority = Priority::try_from(persisted_priority.as_str())
        .map_err(TodoRepositoryError::persistence)?;

    let data = PersistedTodoData {
        id: TodoId::from_uuid(id),
        title,
        description,
        status,
        priority,
        due_date: due_date.map(DueDate::from_persisted),
        created_at,
        updated_at,
        completed_at,
    };
    Ok(Todo::from_persisted(data))
}
