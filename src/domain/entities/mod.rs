//! Core domain entities.
//!
//! - [`Link`] - A generated tracking link
//! - [`LinkRequest`] - Caller input for a new link
//! - [`AuditEvent`] - An audit trail entry for a link mutation

pub mod audit;
pub mod link;
pub mod link_request;

pub use audit::{AuditAction, AuditEvent};
pub use link::{Link, LinkMetadata, LinkStatus, LinkType, UnknownLinkType};
pub use link_request::{DynamicValue, LinkRequest};
