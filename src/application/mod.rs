//! Application layer services implementing business logic.
//!
//! Services coordinate the pure tracking core with the storage contracts
//! and expose a small API to HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::IdAllocator`] - Link identifier allocation with degradation
//! - [`services::LinkService`] - Link generation, lookup, listing and deletion

pub mod services;
