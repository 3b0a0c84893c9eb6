//! Adapter implementations of the todo ports.

pub mod logging;
pub mod memory;
pub mod postgres;
