//! Domain model for todo items.
//!
//! Value objects validate themselves on construction, the [`Todo`] aggregate
//! owns every status transition and records the events describing them, and
//! nothing here depends on storage or messaging.

mod due_date;
mod error;
mod events;
mod ids;
mod priority;
mod status;
mod title;
mod todo;

pub use due_date::DueDate;
pub use error::{TodoDomainError, TodoErrorKind};
pub use events::{TodoEvent, TodoEventKind, TodoEventPayload, TodoField};
pub use ids::TodoId;
pub use priority::Priority;
pub use status::TaskStatus;
pub use title::TaskTitle;
pub use todo::{PersistedTodoData, Todo};
