use std::collections::BTreeSet;
use std::sync::Arc;
use link_hub::application::services::{AllocationPath, IdAllocator, format_link_id};
use link_hub::domain::repositories::CounterStore;
use link_hub::infrastructure::counter::MemoryCounterStore;

const TASKS: i64 = 200;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_allocations_are_distinct_and_gap_free() {
    let store: Arc<dyn CounterStore> = Arc::new(MemoryCounterStore::new());
    let allocator = IdAllocator::new(store.clone(), "link_counter");

    let handles: Vec<_> = (0..TASKS)
        .map(|_| {
            let allocator = allocator.clone();
            tokio::spawn(async move { allocator.allocate().await })
        })
        .collect();

    let mut ids = BTreeSet::new();
    for handle in handles {
        let allocation = handle.await.unwrap();
        assert_eq!(allocation.path, AllocationPath::Atomic);
        assert!(allocation.guaranteed_unique());
        assert!(ids.insert(allocation.id), "duplicate identifier issued");
    }

    let expected: BTreeSet<String> = (1..=TASKS).map(format_link_id).collect();
    assert_eq!(ids, expected);
    assert_eq!(store.get_counter("link_counter").await.unwrap(), Some(TASKS));
}

#[tokio::test]
async fn test_separate_keys_count_independently() {
    let store: Arc<dyn CounterStore> = Arc::new(MemoryCounterStore::new());
    let links = IdAllocator::new(store.clone(), "link_counter");
    let other = IdAllocator::new(store, "other_counter");

    assert_eq!(links.allocate().await.id, "lnk_000001");
    assert_eq!(links.allocate().await.id, "lnk_000002");
    assert_eq!(other.allocate().await.id, "lnk_000001");
}

#[tokio::test]
async fn test_allocator_without_store_issues_random_ids() {
    let allocator = IdAllocator::without_store();

    let allocation = allocator.allocate().await;

    assert_eq!(allocation.path, AllocationPath::Random);
    assert!(!allocation.guaranteed_unique());
    assert!(allocation.id.starts_with("lnk_"));
    assert_eq!(allocation.id.len(), "lnk_".len() + 6);
    assert!(
        allocation.id["lnk_".len()..]
            .chars()
            .all(|c| c.is_ascii_hexdigit())
    );
}
