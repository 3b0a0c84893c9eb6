//! In-memory adapters for todo persistence and event publishing.

mod dispatcher;
mod repository;

pub use dispatcher::InMemoryEventDispatcher;
pub use repository::InMemoryTodoRepository;
