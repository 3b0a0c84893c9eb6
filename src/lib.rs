//! Todo core: task tracking with a validated domain model.
//!
//! This crate provides the domain aggregate, state machine and application
//! orchestration for a small task-tracking service. Transport, storage
//! bootstrap and presentation live outside it and talk to the core through
//! its ports.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, logging, memory)
//!
//! # Modules
//!
//! - [`todo`]: Todo lifecycle, events and use cases

pub mod todo;
