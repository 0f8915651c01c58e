//! Link identifier allocation.
//!
//! Identifiers look like `lnk_000042`: a zero-padded counter value that
//! widens past six digits. The counter lives in an external store and is
//! advanced with a single atomic increment, which keeps identifiers unique
//! and strictly increasing across concurrent callers.
//!
//! Link creation must not fail because the counter store is unreachable.
//! When the store errors, or none is configured, the allocator issues
//! `lnk_<hex6>` from random bytes instead and reports that the identifier
//! carries no uniqueness guarantee.

use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::repositories::{CounterError, CounterStore};

/// Key of the counter backing link identifiers.
pub const DEFAULT_COUNTER_KEY: &str = "link_counter";

/// Which allocation path produced an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationPath {
    /// Atomic increment at the store.
    Atomic,
    /// Client-side read then write; sequential but racy.
    ReadModifyWrite,
    /// Random suffix, store unavailable or not configured.
    Random,
}

/// An issued identifier and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub id: String,
    pub path: AllocationPath,
}

impl Allocation {
    /// True only for identifiers issued through the atomic increment.
    pub fn guaranteed_unique(&self) -> bool {
        self.path == AllocationPath::Atomic
    }
}

/// Formats a counter value as a link identifier.
pub fn format_link_id(count: i64) -> String {
    format!("lnk_{count:06}")
}

/// Produces `lnk_` followed by six random hex characters.
pub fn random_link_id() -> String {
    let bytes: [u8; 3] = rand::rng().random();
    format!("lnk_{}", hex::encode(bytes))
}

/// Issues link identifiers against an injected counter store.
#[derive(Clone)]
pub struct IdAllocator {
    store: Option<Arc<dyn CounterStore>>,
    counter_key: String,
}

impl IdAllocator {
    /// Creates an allocator backed by `store`.
    pub fn new(store: Arc<dyn CounterStore>, counter_key: impl Into<String>) -> Self {
        Self {
            store: Some(store),
            counter_key: counter_key.into(),
        }
    }

    /// Creates an allocator with no store. Every identifier is random.
    pub fn without_store() -> Self {
        Self {
            store: None,
            counter_key: DEFAULT_COUNTER_KEY.to_string(),
        }
    }

    pub fn counter_key(&self) -> &str {
        &self.counter_key
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Returns true if a store is configured and answers.
    pub async fn health_check(&self) -> bool {
        match &self.store {
            Some(store) => store.health_check().await,
            None => false,
        }
    }

    /// Allocates the next identifier. Never fails.
    pub async fn allocate(&self) -> Allocation {
        let Some(store) = &self.store else {
            return self.degraded("no counter store configured");
        };

        match store.atomic_increment(&self.counter_key).await {
            Ok(count) => {
                let id = format_link_id(count);
                debug!(%id, "Allocated link id");
                Allocation {
                    id,
                    path: AllocationPath::Atomic,
                }
            }
            Err(CounterError::Unsupported) => {
                match self.read_modify_write(store.as_ref()).await {
                    Ok(count) => {
                        let id = format_link_id(count);
                        debug!(%id, "Allocated link id without atomic increment");
                        Allocation {
                            id,
                            path: AllocationPath::ReadModifyWrite,
                        }
                    }
                    Err(e) => self.degraded(&e.to_string()),
                }
            }
            Err(e) => self.degraded(&e.to_string()),
        }
    }

    async fn read_modify_write(&self, store: &dyn CounterStore) -> Result<i64, CounterError> {
        let current = store.get_counter(&self.counter_key).await?.unwrap_or(0);
        let next = current + 1;
        store.set_counter(&self.counter_key, next).await?;
        Ok(next)
    }

    fn degraded(&self, reason: &str) -> Allocation {
        let id = random_link_id();
        warn!(
            %id,
            counter_key = %self.counter_key,
            reason,
            "Counter unavailable, issued random link id without uniqueness guarantee"
        );
        Allocation {
            id,
            path: AllocationPath::Random,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockCounterStore;

    fn is_random_id(id: &str) -> bool {
        id.strip_prefix("lnk_").is_some_and(|hex| {
            hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        })
    }

    #[test]
    fn test_format_link_id_pads_to_six() {
        assert_eq!(format_link_id(1), "lnk_000001");
        assert_eq!(format_link_id(42), "lnk_000042");
        assert_eq!(format_link_id(999_999), "lnk_999999");
    }

    #[test]
    fn test_format_link_id_widens() {
        assert_eq!(format_link_id(1_000_000), "lnk_1000000");
    }

    #[test]
    fn test_random_link_id_shape() {
        for _ in 0..100 {
            let id = random_link_id();
            assert!(is_random_id(&id), "unexpected id {id}");
        }
    }

    #[tokio::test]
    async fn test_atomic_path() {
        let mut store = MockCounterStore::new();
        store
            .expect_atomic_increment()
            .withf(|key| key == "link_counter")
            .times(1)
            .returning(|_| Ok(7));
        store.expect_get_counter().times(0);
        store.expect_set_counter().times(0);

        let allocator = IdAllocator::new(Arc::new(store), DEFAULT_COUNTER_KEY);
        let allocation = allocator.allocate().await;

        assert_eq!(allocation.id, "lnk_000007");
        assert_eq!(allocation.path, AllocationPath::Atomic);
        assert!(allocation.guaranteed_unique());
    }

    #[tokio::test]
    async fn test_first_allocation_returns_one() {
        let mut store = MockCounterStore::new();
        store.expect_atomic_increment().returning(|_| Ok(1));

        let allocator = IdAllocator::new(Arc::new(store), DEFAULT_COUNTER_KEY);
        assert_eq!(allocator.allocate().await.id, "lnk_000001");
    }

    #[tokio::test]
    async fn test_unsupported_falls_back_to_read_modify_write() {
        let mut store = MockCounterStore::new();
        store
            .expect_atomic_increment()
            .returning(|_| Err(CounterError::Unsupported));
        store
            .expect_get_counter()
            .withf(|key| key == "link_counter")
            .returning(|_| Ok(Some(41)));
        store
            .expect_set_counter()
            .withf(|key, value| key == "link_counter" && *value == 42)
            .times(1)
            .returning(|_, _| Ok(()));

        let allocator = IdAllocator::new(Arc::new(store), DEFAULT_COUNTER_KEY);
        let allocation = allocator.allocate().await;

        assert_eq!(allocation.id, "lnk_000042");
        assert_eq!(allocation.path, AllocationPath::ReadModifyWrite);
        assert!(!allocation.guaranteed_unique());
    }

    #[tokio::test]
    async fn test_read_modify_write_initializes_missing_counter() {
        let mut store = MockCounterStore::new();
        store
            .expect_atomic_increment()
            .returning(|_| Err(CounterError::Unsupported));
        store.expect_get_counter().returning(|_| Ok(None));
        store
            .expect_set_counter()
            .withf(|key, value| key == "link_counter" && *value == 1)
            .returning(|_, _| Ok(()));

        let allocator = IdAllocator::new(Arc::new(store), DEFAULT_COUNTER_KEY);
        assert_eq!(allocator.allocate().await.id, "lnk_000001");
    }

    #[tokio::test]
    async fn test_store_unavailable_degrades_to_random() {
        let mut store = MockCounterStore::new();
        store
            .expect_atomic_increment()
            .returning(|_| Err(CounterError::Unavailable("connection refused".into())));

        let allocator = IdAllocator::new(Arc::new(store), DEFAULT_COUNTER_KEY);
        let allocation = allocator.allocate().await;

        assert_eq!(allocation.path, AllocationPath::Random);
        assert!(!allocation.guaranteed_unique());
        assert!(is_random_id(&allocation.id));
    }

    #[tokio::test]
    async fn test_fallback_write_failure_degrades_to_random() {
        let mut store = MockCounterStore::new();
        store
            .expect_atomic_increment()
            .returning(|_| Err(CounterError::Unsupported));
        store.expect_get_counter().returning(|_| Ok(Some(3)));
        store
            .expect_set_counter()
            .returning(|_, _| Err(CounterError::Backend("read-only".into())));

        let allocator = IdAllocator::new(Arc::new(store), DEFAULT_COUNTER_KEY);
        assert_eq!(allocator.allocate().await.path, AllocationPath::Random);
    }

    #[tokio::test]
    async fn test_without_store_is_random() {
        let allocator = IdAllocator::without_store();
        let allocation = allocator.allocate().await;

        assert_eq!(allocation.path, AllocationPath::Random);
        assert!(is_random_id(&allocation.id));
        assert!(!allocator.has_store());
        assert!(!allocator.health_check().await);
    }

    #[tokio::test]
    async fn test_custom_counter_key() {
        let mut store = MockCounterStore::new();
        store
            .expect_atomic_increment()
            .withf(|key| key == "staging_counter")
            .returning(|_| Ok(12));

        let allocator = IdAllocator::new(Arc::new(store), "staging_counter");
        assert_eq!(allocator.counter_key(), "staging_counter");
        assert_eq!(allocator.allocate().await.id, "lnk_000012");
    }
}
