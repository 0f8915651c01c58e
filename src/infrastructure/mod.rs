//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the storage contracts defined by the domain
//! layer.
//!
//! # Modules
//!
//! - [`counter`] - Counter stores for identifier allocation
//! - [`persistence`] - Link repositories (PostgreSQL and in-memory)

pub mod counter;
pub mod persistence;
