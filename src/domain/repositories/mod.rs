//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contracts; implementations live in
//! `crate::infrastructure`. Mock implementations are generated via
//! `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Tracking link persistence
//! - [`CounterStore`] - Persistent counter behind identifier allocation

pub mod counter_store;
pub mod link_repository;

pub use counter_store::{CounterError, CounterStore};
pub use link_repository::{DEFAULT_LIST_LIMIT, LinkFilter, LinkRepository};

#[cfg(test)]
pub use counter_store::MockCounterStore;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
