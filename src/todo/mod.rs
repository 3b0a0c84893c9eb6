//! Todo management.
//!
//! Clients create, inspect, change and remove todo items. The module follows
//! hexagonal architecture:
//!
//! - Domain types, the [`domain::Todo`] aggregate and its events in [`domain`]
//! - Port contracts for persistence and event publishing in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Use-case orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
