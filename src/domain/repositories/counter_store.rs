//! Persistent counter backing link identifier allocation.

use async_trait::async_trait;

/// Errors reported by a counter backend.
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    /// The backend could not be reached.
    #[error("counter store unavailable: {0}")]
    Unavailable(String),

    /// The backend has no atomic increment; callers may fall back to
    /// [`CounterStore::get_counter`] and [`CounterStore::set_counter`].
    ///
    /// None of the bundled stores return this. It exists for backends that
    /// only offer plain reads and writes (a key-value store without `INCR`,
    /// a settings file), which still get sequential identifiers through the
    /// allocator's read-modify-write path.
    #[error("atomic increment not supported by this counter store")]
    Unsupported,

    /// The backend answered with an error.
    #[error("counter store error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for CounterError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                CounterError::Unavailable(e.to_string())
            }
            other => CounterError::Backend(other.to_string()),
        }
    }
}

impl From<redis::RedisError> for CounterError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_io_error() || e.is_connection_dropped() || e.is_timeout() {
            CounterError::Unavailable(e.to_string())
        } else {
            CounterError::Backend(e.to_string())
        }
    }
}

/// Storage contract for named integer counters.
///
/// # Implementations
///
/// - [`crate::infrastructure::counter::PgCounterStore`] - PostgreSQL upsert
/// - [`crate::infrastructure::counter::RedisCounterStore`] - Redis `INCR`
/// - [`crate::infrastructure::counter::MemoryCounterStore`] - In-process, for development
///
/// All three increment atomically. A store without that capability should
/// return [`CounterError::Unsupported`] from `atomic_increment` and implement
/// only the read and write methods.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Increments `key` and returns the new value as one indivisible operation.
    ///
    /// A missing counter is created and the call returns 1. Concurrent
    /// callers never observe the same value.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::Unsupported`] when the backend cannot do this
    /// atomically, or another [`CounterError`] if the backend fails.
    async fn atomic_increment(&self, key: &str) -> Result<i64, CounterError>;

    /// Reads the current value, `None` if the counter does not exist yet.
    async fn get_counter(&self, key: &str) -> Result<Option<i64>, CounterError>;

    /// Overwrites the counter value.
    async fn set_counter(&self, key: &str, value: i64) -> Result<(), CounterError>;

    /// Returns true if the backend answers.
    async fn health_check(&self) -> bool;
}
