//! Port contracts for todo management.
//!
//! Ports define infrastructure-agnostic interfaces used by todo services.

pub mod events;
pub mod repository;

pub use events::{EventDispatchError, EventDispatchResult, EventDispatcher};
pub use repository::{TodoFilter, TodoRepository, TodoRepositoryError, TodoRepositoryResult};
