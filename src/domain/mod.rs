//! Domain layer containing business entities and logic.
//!
//! Nothing in here depends on the infrastructure or presentation layers.
//!
//! # Architecture
//!
//! - [`entities`] - Link records and their value types
//! - [`tracking`] - Pure normalization, parameter and URL logic
//! - [`repositories`] - Storage contracts implemented by the infrastructure layer
//!
//! # Link Generation Flow
//!
//! 1. Caller fields are normalized by [`tracking::NormalizedFields::from_raw`]
//! 2. [`crate::application::services::IdAllocator`] issues the link identifier
//! 3. Tracking parameters and the destination URL are derived in [`tracking`]
//! 4. [`entities::Link::assemble`] composes the record
//! 5. The record is persisted via [`repositories::LinkRepository`]

pub mod entities;
pub mod repositories;
pub mod tracking;
