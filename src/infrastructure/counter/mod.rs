//! Counter store implementations backing link identifier allocation.
//!
//! - [`PgCounterStore`] - PostgreSQL upsert on the `settings` table
//! - [`RedisCounterStore`] - Redis `INCR`
//! - [`MemoryCounterStore`] - In-process map for development and tests

mod memory_counter_store;
mod pg_counter_store;
mod redis_counter_store;

pub use memory_counter_store::MemoryCounterStore;
pub use pg_counter_store::PgCounterStore;
pub use redis_counter_store::RedisCounterStore;
