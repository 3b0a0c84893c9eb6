//! Application services for todo orchestration.

mod config;
mod dto;
mod service;

pub use config::TodoServiceConfig;
pub use dto::{CreateTodoRequest, ListTodosRequest, TodoPage, TodoResponse, UpdateTodoRequest};
pub use service::{InfrastructureError, TodoService, TodoServiceError, TodoServiceResult};
