//! End-to-end store tests: store, worker and an in-memory catalog source.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use catalog_scroll::app::spawn_catalog_worker;
use catalog_scroll::sources::{CachedSource, CatalogError, CatalogSource};
use catalog_scroll::state::{
    CatalogItem, CatalogStore, FilterCriteria, LoadPhase, PriceCategory, PriceRange, SortKey,
    StoreOptions,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// In-memory source answering after a delay, optionally failing after N calls.
struct Memory {
    items: Vec<CatalogItem>,
    delay: Duration,
    fail_from: Option<usize>,
    calls: AtomicUsize,
}

impl Memory {
    fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items,
            delay: Duration::from_millis(50),
            fail_from: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CatalogSource for Memory {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.fail_from.is_some_and(|f| n >= f) {
            return Err(CatalogError::Network("connection refused".into()));
        }
        Ok(self.items.clone())
    }
}

fn catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new("1", "Cool Dress", "Ann", 0, 50.0, "a.png"),
        CatalogItem::new("2", "basic tee", "Bo", 1, 0.0, "b.png"),
        CatalogItem::new("3", "Denim Jacket", "Cy", 0, 120.0, "c.png"),
        CatalogItem::new("4", "Archive Scarf", "Di", 2, 0.0, "d.png"),
        CatalogItem::new("5", "Wool Coat", "Ann", 0, 50.0, "e.png"),
        CatalogItem::new("6", "Summer Dress", "Eve", 1, 0.0, "f.png"),
    ]
}

fn big_catalog(n: usize) -> Vec<CatalogItem> {
    (0..n)
        .map(|i| CatalogItem::new(format!("{i}"), format!("Item {i:03}"), "maker", 1, 0.0, ""))
        .collect()
}

fn start<S: CatalogSource + 'static>(
    source: S,
    page_size: usize,
) -> (CatalogStore, JoinHandle<()>) {
    let (query_tx, query_rx) = mpsc::unbounded_channel();
    let store = CatalogStore::new(
        StoreOptions {
            page_size,
            ..StoreOptions::default()
        },
        query_tx,
    );
    let worker = spawn_catalog_worker(source, query_rx, store.event_sender());
    (store, worker)
}

fn ids(store: &CatalogStore) -> Vec<&str> {
    store.window().iter().map(|i| i.id.as_str()).collect()
}

#[tokio::test(start_paused = true)]
/// What: Pages of 8, 8, 4 and a no-op fourth advance
///
/// - Input: 20-item catalog, page size 8
/// - Output: Window sizes 8, 16, 20; `has_more` true, true, false; fourth advance rejected
async fn pagination_exhaustion() {
    let (mut store, _worker) = start(Memory::new(big_catalog(20)), 8);
    store.refresh();
    store.settle().await;
    assert_eq!(store.window().len(), 8);
    assert!(store.has_more());

    assert!(store.advance_page());
    store.settle().await;
    assert_eq!(store.window().len(), 16);
    assert!(store.has_more());

    assert!(store.advance_page());
    store.settle().await;
    assert_eq!(store.window().len(), 20);
    assert!(!store.has_more());

    assert!(!store.advance_page());
    store.settle().await;
    assert_eq!(store.window().len(), 20);
    assert!(!store.has_more());
    assert_eq!(store.page_index(), 3);
}

#[tokio::test(start_paused = true)]
/// What: A response for superseded criteria never reaches the window
///
/// - Input: Refresh (criteria A = all), then select Paid and sort by price before it resolves
/// - Output: Window shows only paid items by descending price; two fetches total
async fn stale_response_never_clobbers() {
    let source = Arc::new(Memory::new(catalog()));
    let (mut store, _worker) = start(Arc::clone(&source), 20);
    store.refresh();
    store.toggle_pricing(PriceCategory::Paid);
    assert!(store.set_sort(SortKey::PriceDescending));
    assert!(store.window().is_empty());

    store.settle().await;
    assert_eq!(store.phase(), LoadPhase::Ready);
    assert_eq!(ids(&store), vec!["3", "1", "5"]);
    assert_eq!(source.calls(), 2);
    assert_eq!(store.requests_sent(), 2);
}

#[tokio::test(start_paused = true)]
/// What: Pricing and price range combine as documented
///
/// - Input: {Paid} with range 0..100, then {Paid, Free}
/// - Output: Paid items in range only; then also every free item
async fn pricing_and_range_conjunction() {
    let (mut store, _worker) = start(Memory::new(catalog()), 20);
    store.toggle_pricing(PriceCategory::Paid);
    store.set_price_range(PriceRange::new(0.0, 100.0));
    store.settle().await;
    assert_eq!(ids(&store), vec!["1", "5"]);

    store.toggle_pricing(PriceCategory::Free);
    store.settle().await;
    assert_eq!(ids(&store), vec!["2", "1", "6", "5"]);
}

#[tokio::test(start_paused = true)]
/// What: Keystrokes inside the debounce window collapse into one commit
///
/// - Input: "d", "dr", "DRESS" typed 100ms apart after the initial load
/// - Output: One extra fetch; committed keyword "DRESS"; both dresses shown
async fn keyword_debounce_commits_last_text() {
    let source = Arc::new(Memory::new(catalog()));
    let (mut store, _worker) = start(Arc::clone(&source), 20);
    store.refresh();
    store.settle().await;
    let before = source.calls();

    store.set_keyword("d");
    tokio::time::advance(Duration::from_millis(100)).await;
    store.set_keyword("dr");
    tokio::time::advance(Duration::from_millis(100)).await;
    store.set_keyword("DRESS");
    assert_eq!(store.criteria().keyword, "");
    assert_eq!(store.keyword_draft(), "DRESS");

    store.settle().await;
    assert_eq!(source.calls(), before + 1);
    assert_eq!(store.criteria().keyword, "DRESS");
    assert_eq!(ids(&store), vec!["1", "6"]);
}

#[tokio::test(start_paused = true)]
/// What: Reset cancels a pending keyword and recomputes once
///
/// - Input: Mutations, a pending keystroke, then reset
/// - Output: Default criteria, empty draft, exactly one more fetch
async fn reset_cancels_pending_keyword() {
    let source = Arc::new(Memory::new(catalog()));
    let (mut store, _worker) = start(Arc::clone(&source), 20);
    store.toggle_pricing(PriceCategory::Paid);
    store.set_price_range(PriceRange::new(60.0, 200.0));
    store.settle().await;
    store.set_keyword("coat");

    let before = source.calls();
    store.reset();
    store.settle().await;
    assert_eq!(store.criteria(), &FilterCriteria::default());
    assert_eq!(store.keyword_draft(), "");
    assert_eq!(source.calls(), before + 1);
    assert_eq!(store.window().len(), 6);
}

#[tokio::test(start_paused = true)]
/// What: Failures surface; a later action clears the error and retries
///
/// - Input: Source failing from the second call, no cache
/// - Output: Failed with empty window; after a toggle the error is replaced by a new attempt
async fn failure_then_retry() {
    let mut memory = Memory::new(catalog());
    memory.fail_from = Some(1);
    let source = Arc::new(memory);
    let (mut store, _worker) = start(Arc::clone(&source), 20);
    store.refresh();
    store.settle().await;
    assert_eq!(store.window().len(), 6);

    store.refresh();
    store.settle().await;
    assert_eq!(store.phase(), LoadPhase::Failed);
    assert!(store.window().is_empty());
    assert_eq!(
        store.error(),
        Some("network error: connection refused")
    );

    store.toggle_pricing(PriceCategory::Free);
    assert_eq!(store.error(), None);
    store.settle().await;
    assert_eq!(source.calls(), 3);
}

#[tokio::test(start_paused = true)]
/// What: The cached source hides a failing network behind the last good catalog
///
/// - Input: Zero-TTL cache over a source failing from the second call
/// - Output: Every refresh succeeds with the first response
async fn cached_source_serves_stale_on_failure() {
    let mut memory = Memory::new(catalog());
    memory.fail_from = Some(1);
    let memory = Arc::new(memory);
    let source = CachedSource::new(Arc::clone(&memory), Duration::ZERO, 4);
    let (mut store, _worker) = start(source, 20);
    store.refresh();
    store.settle().await;
    store.refresh();
    store.settle().await;
    assert_eq!(store.phase(), LoadPhase::Ready);
    assert_eq!(store.window().len(), 6);
    assert_eq!(memory.calls(), 2);
}

#[tokio::test(start_paused = true)]
/// What: Deselecting Paid while sorted by price falls back to name order
///
/// - Input: {Paid} sorted ascending, then Paid toggled off
/// - Output: Sort key `ByName`; window ordered by title
async fn deselecting_paid_resets_sort() {
    let (mut store, _worker) = start(Memory::new(catalog()), 20);
    store.toggle_pricing(PriceCategory::Paid);
    assert!(store.set_sort(SortKey::PriceAscending));
    store.settle().await;
    assert_eq!(ids(&store), vec!["1", "5", "3"]);

    store.toggle_pricing(PriceCategory::Paid);
    assert_eq!(store.criteria().sort_key, SortKey::ByName);
    assert!(!store.set_sort(SortKey::PriceDescending));
    store.settle().await;
    let titles: Vec<&str> = store.window().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Archive Scarf",
            "basic tee",
            "Cool Dress",
            "Denim Jacket",
            "Summer Dress",
            "Wool Coat"
        ]
    );
}
