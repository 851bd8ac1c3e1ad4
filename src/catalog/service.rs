//! Catalog Service Module
//!
//! Composition root tying the store, the query engine and the stats cache
//! together behind the four catalog operations.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::{CatalogStats, StatsCache};
use crate::catalog::{query, Item, ItemDraft, ListParams, Page, Store};
use crate::error::{CatalogError, Result};

// == Catalog Service ==
/// Catalog operations over a shared [`Store`].
///
/// `create` calls are serialized by a writer lock, so concurrent creates in
/// one process never lose each other's append. Reads take no lock.
#[derive(Debug)]
pub struct CatalogService {
    store: Arc<dyn Store>,
    stats: StatsCache,
    write_lock: Mutex<()>,
}

impl CatalogService {
    // == Constructor ==
    /// Creates a service whose stats cache is invalidated by `store` mutations.
    pub fn new(store: Arc<dyn Store>, stats_ttl: Duration) -> Self {
        let stats = StatsCache::watching(store.clone(), stats_ttl);
        Self::with_cache(store, stats)
    }

    /// Creates a service around an existing cache. The cache is expected to
    /// already be subscribed to `store`.
    pub fn with_cache(store: Arc<dyn Store>, stats: StatsCache) -> Self {
        Self {
            store,
            stats,
            write_lock: Mutex::new(()),
        }
    }

    pub fn stats_cache(&self) -> &StatsCache {
        &self.stats
    }

    // == List ==
    /// Filtered, paginated listing. Never touches the stats cache.
    pub fn list(&self, params: &ListParams) -> Result<Page> {
        let items = self.store.read_all()?;
        let filtered = query::search(items, params.term.as_deref());
        let page = query::paginate(filtered, params.page, params.limit);

        debug!(
            "Listed page {} of {} ({} matches)",
            page.pagination.page, page.pagination.total_pages, page.pagination.total
        );
        Ok(page)
    }

    // == Get ==
    /// Looks up one item by id.
    pub fn get(&self, id: i64) -> Result<Item> {
        let items = self.store.read_all()?;
        query::find_by_id(&items, id)
            .cloned()
            .ok_or_else(CatalogError::item_not_found)
    }

    /// Looks up one item by a raw id string; an unparsable id is not found.
    pub fn get_raw(&self, raw_id: &str) -> Result<Item> {
        match query::parse_id(raw_id) {
            Some(id) => self.get(id),
            None => Err(CatalogError::item_not_found()),
        }
    }

    // == Create ==
    /// Validates and appends a new item, returning it with its assigned id.
    ///
    /// Invalid drafts are rejected before the store is read or written. The
    /// store's mutation observers (including the stats cache) have fired by
    /// the time this returns.
    ///
    /// This is `Store::append` spelled out: the id is derived from the same
    /// collection the append writes back, so the read, id assignment and
    /// replace all happen under the writer lock with a single read.
    pub fn create(&self, draft: &ItemDraft) -> Result<Item> {
        let valid = draft.validate()?;

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        // One read serves both id assignment and the append
        let mut items = self.store.read_all()?;
        let item = valid.with_id(next_id(&items));
        items.push(item.clone());
        self.store.replace_all(&items)?;

        info!("Created item {} in category '{}'", item.id, item.category);
        Ok(item)
    }

    // == Stats ==
    /// Aggregate stats, served from the cache when fresh.
    pub fn stats(&self) -> Result<CatalogStats> {
        self.stats.get()
    }
}

/// Creation-time id in Unix milliseconds, bumped past the current maximum so
/// ids stay unique even for creates within the same millisecond.
fn next_id(items: &[Item]) -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    match items.iter().map(|i| i.id).max() {
        Some(max) if max >= now => max.saturating_add(1),
        _ => now,
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, StatsCache};
    use crate::catalog::MemoryStore;
    use std::collections::HashSet;
    use std::thread;

    const TTL: Duration = Duration::from_secs(300);

    fn sample_items() -> Vec<Item> {
        vec![
            Item::new(1, "Test Laptop", "Electronics", 1000.0),
            Item::new(2, "Test Chair", "Furniture", 500.0),
            Item::new(3, "Test Phone", "Electronics", 800.0),
        ]
    }

    fn setup() -> (Arc<MemoryStore>, CatalogService) {
        let store = Arc::new(MemoryStore::new(sample_items()));
        let clock = Arc::new(ManualClock::new(0));
        let cache = StatsCache::watching_with_clock(store.clone(), TTL, clock);
        let service = CatalogService::with_cache(store.clone(), cache);
        (store, service)
    }

    #[test]
    fn test_list_search_electronics() {
        let (_, service) = setup();
        let page = service.list(&ListParams::with_term("electronics")).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total, 2);
    }

    #[test]
    fn test_list_total_independent_of_page() {
        let (_, service) = setup();
        let page = service
            .list(&ListParams::new(Some("test".to_string()), 3, 1))
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[test]
    fn test_get_found_and_missing() {
        let (_, service) = setup();
        assert_eq!(service.get(1).unwrap().name, "Test Laptop");
        assert!(matches!(service.get(999), Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_get_raw_unparsable_is_not_found() {
        let (_, service) = setup();
        assert!(matches!(
            service.get_raw("invalid"),
            Err(CatalogError::NotFound(_))
        ));
        assert_eq!(service.get_raw("2").unwrap().id, 2);
    }

    #[test]
    fn test_create_roundtrip() {
        let (store, service) = setup();
        let created = service
            .create(&ItemDraft::new("New Test Item", "Test Category", 123.45))
            .unwrap();

        assert_eq!(service.get(created.id).unwrap(), created);
        assert_eq!(created.name, "New Test Item");
        assert_eq!(created.price, 123.45);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_create_appends_after_existing_with_one_read() {
        let (store, service) = setup();
        let reads_before = store.read_count();

        let created = service
            .create(&ItemDraft::new("Test Desk", "Furniture", 250.0))
            .unwrap();

        assert_eq!(store.read_count(), reads_before + 1);
        let items = store.read_all().unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, created.id]);
        assert!(created.id > 3);
    }

    #[test]
    fn test_create_invalid_never_touches_store() {
        let (store, service) = setup();
        let reads_before = store.read_count();

        let result = service.create(&ItemDraft::new("Desk", "Furniture", -1.0));
        assert!(matches!(result, Err(CatalogError::InvalidPayload(_))));
        assert_eq!(store.len(), 3);
        assert_eq!(store.read_count(), reads_before);
    }

    #[test]
    fn test_create_invalidates_stats() {
        let (store, service) = setup();

        assert_eq!(service.stats().unwrap().total, 3);
        service
            .create(&ItemDraft::new("Test Desk", "Furniture", 250.0))
            .unwrap();
        let reads_before = store.read_count();

        let stats = service.stats().unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.min_price, 250.0);
        assert_eq!(store.read_count(), reads_before + 1);
    }

    #[test]
    fn test_list_does_not_touch_cache() {
        let (_, service) = setup();
        service.list(&ListParams::default()).unwrap();
        assert_eq!(
            service.stats_cache().state(),
            crate::cache::CacheState::Cold
        );
    }

    #[test]
    fn test_next_id_is_unique_past_max() {
        let far_future = chrono::Utc::now().timestamp_millis() + 1_000_000;
        let items = vec![Item::new(far_future, "A", "B", 1.0)];
        assert_eq!(next_id(&items), far_future + 1);
    }

    #[test]
    fn test_concurrent_creates_keep_every_item() {
        let (store, service) = setup();
        let service = Arc::new(service);

        let handles: Vec<_> = (0..10)
            .map(|n| {
                let service = service.clone();
                thread::spawn(move || {
                    service
                        .create(&ItemDraft::new(format!("Item {}", n), "Bulk", 1.0 + n as f64))
                        .unwrap()
                })
            })
            .collect();

        let ids: HashSet<i64> = handles.into_iter().map(|h| h.join().unwrap().id).collect();
        assert_eq!(ids.len(), 10);
        assert_eq!(store.len(), 13);
    }
}
