//! In-process counter store for local development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::repositories::{CounterError, CounterStore};

/// Counters held in a mutex-guarded map.
///
/// Values are lost on restart, so identifiers repeat across process
/// lifetimes. Only suitable when no persistent store is configured.
#[derive(Default)]
pub struct MemoryCounterStore {
    counters: Mutex<HashMap<String, i64>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        debug!("Using in-memory counter store");
        Self::default()
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn atomic_increment(&self, key: &str) -> Result<i64, CounterError> {
        let mut counters = self.counters.lock().await;
        let count = counters.entry(key.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn get_counter(&self, key: &str) -> Result<Option<i64>, CounterError> {
        Ok(self.counters.lock().await.get(key).copied())
    }

    async fn set_counter(&self, key: &str, value: i64) -> Result<(), CounterError> {
        self.counters.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_increment_starts_at_one() {
        let store = MemoryCounterStore::new();
        assert_eq!(store.get_counter("link_counter").await.unwrap(), None);
        assert_eq!(store.atomic_increment("link_counter").await.unwrap(), 1);
        assert_eq!(store.atomic_increment("link_counter").await.unwrap(), 2);
        assert_eq!(store.get_counter("link_counter").await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = MemoryCounterStore::new();
        store.atomic_increment("a").await.unwrap();
        store.atomic_increment("a").await.unwrap();
        assert_eq!(store.atomic_increment("b").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_set_then_increment() {
        let store = MemoryCounterStore::new();
        store.set_counter("link_counter", 41).await.unwrap();
        assert_eq!(store.atomic_increment("link_counter").await.unwrap(), 42);
    }
}
