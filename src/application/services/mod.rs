//! Business logic services for the application layer.

pub mod id_allocator;
pub mod link_service;

pub use id_allocator::{
    Allocation, AllocationPath, DEFAULT_COUNTER_KEY, IdAllocator, format_link_id, random_link_id,
};
pub use link_service::{GeneratedLink, LinkService};
