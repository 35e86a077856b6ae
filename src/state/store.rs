//! Stateful catalog store driving fetch, filter, sort and page reveal.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::types::{
    CatalogItem, CatalogQuery, CatalogResults, FilterCriteria, PriceCategory, PriceRange, SortKey,
    StoreEvent,
};
use crate::logic::{apply_filters_and_sort, next_slice};

/// Items revealed per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Quiet period after the last keystroke before a keyword is committed.
pub const DEFAULT_KEYWORD_DEBOUNCE: Duration = Duration::from_millis(500);

/// Outcome of the most recent fetch-and-recompute cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPhase {
    /// Nothing requested yet.
    Idle,
    /// A recompute is pending; the window is empty.
    Loading,
    /// Results are available.
    Ready,
    /// The last fetch failed; `error` holds the message.
    Failed,
}

/// Tunables for [`CatalogStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    /// Items per revealed page.
    pub page_size: usize,
    /// Keyword debounce interval.
    pub keyword_debounce: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            keyword_debounce: DEFAULT_KEYWORD_DEBOUNCE,
        }
    }
}

/// Read-only view handed to the rendering layer.
#[derive(Clone, Debug, Serialize)]
pub struct StoreSnapshot {
    /// Revealed prefix of the result.
    pub window: Vec<CatalogItem>,
    /// Number of items in the full filtered result.
    pub total_count: usize,
    /// Whether a fetch-and-recompute cycle is pending.
    pub is_loading: bool,
    /// Whether a page reveal is pending.
    pub is_revealing: bool,
    /// Message of the last failed fetch.
    pub error: Option<String>,
    /// Whether more pages can be revealed.
    pub has_more: bool,
    /// Pages revealed so far.
    pub page_index: usize,
    /// Current phase.
    pub phase: LoadPhase,
    /// Committed criteria.
    pub criteria: FilterCriteria,
    /// Keyword text as typed, possibly not yet committed.
    pub keyword_draft: String,
}

/// Single owner of filter criteria and derived result state.
///
/// Actions return immediately. Fetches go out over the query channel to a
/// worker, which answers with [`StoreEvent::Results`] on the store's event
/// channel; callers drive the store with [`CatalogStore::process_next_event`]
/// or [`CatalogStore::settle`].
///
/// Invariants:
/// - At most one fetch is outstanding. Mutations during a fetch update the
///   criteria and mark a refetch, which is sent once the outstanding response
///   arrives.
/// - Every mutation bumps the generation; results and page reveals tagged with
///   an older generation are discarded.
#[derive(Debug)]
pub struct CatalogStore {
    /// Committed criteria.
    criteria: FilterCriteria,
    /// Keyword as typed.
    keyword_draft: String,
    /// Filtered and sorted result for the current generation.
    full_result: Vec<CatalogItem>,
    /// Revealed prefix of `full_result`.
    window: Vec<CatalogItem>,
    /// Pages revealed into `window`.
    page_index: usize,
    /// Whether `window` is shorter than `full_result`.
    has_more: bool,
    /// Current phase.
    phase: LoadPhase,
    /// Whether a page reveal is pending.
    revealing: bool,
    /// Message of the last failed fetch.
    error: Option<String>,
    /// Tunables.
    options: StoreOptions,
    /// Incremented on every criteria mutation and refresh.
    generation: u64,
    /// Generation of the outstanding request, if any.
    in_flight: Option<u64>,
    /// A newer generation is waiting for the outstanding request to finish.
    refetch_pending: bool,
    /// Incremented on every keystroke; stale debounce commits carry an older value.
    keyword_seq: u64,
    /// Armed debounce timer.
    pending_keyword: Option<JoinHandle<()>>,
    /// Outgoing fetch requests.
    query_tx: mpsc::UnboundedSender<CatalogQuery>,
    /// Sender side of the event channel, cloned into workers and timers.
    event_tx: mpsc::UnboundedSender<StoreEvent>,
    /// Incoming events.
    event_rx: mpsc::UnboundedReceiver<StoreEvent>,
    /// Count of requests actually sent to the worker.
    requests_sent: u64,
}

impl CatalogStore {
    /// What: Create a store with default criteria.
    ///
    /// Inputs:
    /// - `options`: Page size and debounce interval
    /// - `query_tx`: Channel to the fetch worker
    ///
    /// Output:
    /// - Store in `Idle`; nothing is fetched until an action or [`CatalogStore::refresh`].
    #[must_use]
    pub fn new(options: StoreOptions, query_tx: mpsc::UnboundedSender<CatalogQuery>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            criteria: FilterCriteria::default(),
            keyword_draft: String::new(),
            full_result: Vec::new(),
            window: Vec::new(),
            page_index: 0,
            has_more: false,
            phase: LoadPhase::Idle,
            revealing: false,
            error: None,
            options: StoreOptions {
                page_size: options.page_size.max(1),
                ..options
            },
            generation: 0,
            in_flight: None,
            refetch_pending: false,
            keyword_seq: 0,
            pending_keyword: None,
            query_tx,
            event_tx,
            event_rx,
            requests_sent: 0,
        }
    }

    /// What: Seed criteria restored from persisted preferences.
    ///
    /// Inputs:
    /// - `criteria`: Previously saved criteria
    ///
    /// Output:
    /// - Store carrying the sanitized criteria; intended before the first fetch.
    #[must_use]
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria.sanitized();
        self.keyword_draft.clone_from(&self.criteria.keyword);
        self
    }

    /// Sender for workers that report back to this store.
    #[must_use]
    pub fn event_sender(&self) -> mpsc::UnboundedSender<StoreEvent> {
        self.event_tx.clone()
    }

    /// Committed criteria.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Keyword as typed.
    #[must_use]
    pub fn keyword_draft(&self) -> &str {
        &self.keyword_draft
    }

    /// Revealed items.
    #[must_use]
    pub fn window(&self) -> &[CatalogItem] {
        &self.window
    }

    /// Size of the full filtered result.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.full_result.len()
    }

    /// Pages revealed so far.
    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    /// Whether more pages can be revealed.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a recompute is pending.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// Whether a page reveal is pending.
    #[must_use]
    pub const fn is_revealing(&self) -> bool {
        self.revealing
    }

    /// Message of the last failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Current generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of fetch requests sent so far.
    #[must_use]
    pub const fn requests_sent(&self) -> u64 {
        self.requests_sent
    }

    /// What: Copy the observable state.
    ///
    /// Output:
    /// - `StoreSnapshot` with window, counts, flags and criteria.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            window: self.window.clone(),
            total_count: self.full_result.len(),
            is_loading: self.is_loading(),
            is_revealing: self.revealing,
            error: self.error.clone(),
            has_more: self.has_more,
            page_index: self.page_index,
            phase: self.phase,
            criteria: self.criteria.clone(),
            keyword_draft: self.keyword_draft.clone(),
        }
    }

    /// Re-run fetch and recompute for the current criteria.
    pub fn refresh(&mut self) {
        self.begin_recompute("refresh");
    }

    /// What: Flip a pricing category and recompute.
    ///
    /// Inputs:
    /// - `category`: Category to toggle
    ///
    /// Details:
    /// - Deselecting `Paid` resets the sort to `ByName` in the same transition.
    pub fn toggle_pricing(&mut self, category: PriceCategory) {
        self.criteria.toggle_pricing(category);
        self.begin_recompute("pricing");
    }

    /// What: Change the price interval and recompute.
    ///
    /// Inputs:
    /// - `range`: New interval
    ///
    /// Details:
    /// - Setting the current range again is a no-op.
    pub fn set_price_range(&mut self, range: PriceRange) {
        if range == self.criteria.price_range {
            debug!("price range unchanged; skipping recompute");
            return;
        }
        self.criteria.price_range = range;
        self.begin_recompute("price_range");
    }

    /// What: Change the sort order and recompute.
    ///
    /// Inputs:
    /// - `key`: Requested sort key
    ///
    /// Output:
    /// - `true` when applied (or already current); `false` for a price sort without `Paid`.
    pub fn set_sort(&mut self, key: SortKey) -> bool {
        if key == self.criteria.sort_key {
            return true;
        }
        if !self.criteria.set_sort(key) {
            debug!(sort = %key, "price sort rejected while Paid is not selected");
            return false;
        }
        self.begin_recompute("sort");
        true
    }

    /// What: Record a keystroke and arm the debounce timer.
    ///
    /// Inputs:
    /// - `text`: Current search box content
    ///
    /// Details:
    /// - Aborts the previously armed timer; only the last text still current after
    ///   the quiet period is committed.
    /// - Spawns a tokio task, so it must be called inside a tokio runtime.
    pub fn set_keyword(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.keyword_draft.clone_from(&text);
        self.cancel_pending_keyword();
        let seq = self.keyword_seq;
        let delay = self.options.keyword_debounce;
        let tx = self.event_tx.clone();
        self.pending_keyword = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(StoreEvent::KeywordCommit { seq, text });
        }));
    }

    /// What: Restore every criterion to its default in one step.
    ///
    /// Details:
    /// - Cancels any pending keyword commit and triggers exactly one recompute.
    pub fn reset(&mut self) {
        self.cancel_pending_keyword();
        self.criteria = FilterCriteria::default();
        self.keyword_draft.clear();
        self.begin_recompute("reset");
    }

    /// What: Request the next page.
    ///
    /// Output:
    /// - `true` when a reveal was scheduled; `false` when not `Ready`, exhausted, or a
    ///   reveal is already pending.
    pub fn advance_page(&mut self) -> bool {
        if self.phase != LoadPhase::Ready || !self.has_more || self.revealing {
            return false;
        }
        self.revealing = true;
        let _ = self.event_tx.send(StoreEvent::RevealPage {
            generation: self.generation,
        });
        true
    }

    /// What: Apply one event.
    ///
    /// Inputs:
    /// - `event`: Worker result, debounce commit or page reveal
    pub fn handle_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Results(results) => {
                let _ = self.handle_results(results);
            }
            StoreEvent::KeywordCommit { seq, text } => self.commit_keyword(seq, text),
            StoreEvent::RevealPage { generation } => self.reveal_page(generation),
        }
    }

    /// What: Apply a worker response.
    ///
    /// Inputs:
    /// - `results`: Response tagged with the generation it was requested for
    ///
    /// Output:
    /// - `true` when applied; `false` when discarded as stale.
    ///
    /// Details:
    /// - A stale response never touches results, window or error. If a newer
    ///   generation is waiting, its request is sent now.
    pub fn handle_results(&mut self, results: CatalogResults) -> bool {
        self.in_flight = None;
        if results.id != self.generation {
            debug!(
                stale = results.id,
                current = self.generation,
                "discarding stale catalog response"
            );
            if self.refetch_pending {
                self.refetch_pending = false;
                self.dispatch();
            }
            return false;
        }
        match results.outcome {
            Ok(raw) => {
                self.full_result = apply_filters_and_sort(&raw, &self.criteria);
                let first = next_slice(&self.full_result, self.options.page_size, 0);
                self.window = first.items;
                self.page_index = first.pages_revealed;
                self.has_more = first.has_more;
                self.phase = LoadPhase::Ready;
                info!(
                    generation = self.generation,
                    fetched = raw.len(),
                    matched = self.full_result.len(),
                    "catalog recomputed"
                );
            }
            Err(message) => {
                warn!(generation = self.generation, error = %message, "catalog fetch failed");
                self.full_result.clear();
                self.window.clear();
                self.page_index = 0;
                self.has_more = false;
                self.error = Some(message);
                self.phase = LoadPhase::Failed;
            }
        }
        true
    }

    /// What: Apply every event already queued without waiting.
    ///
    /// Output:
    /// - Number of events applied.
    pub fn process_pending_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next event and apply it.
    pub async fn process_next_event(&mut self) {
        if let Some(event) = self.event_rx.recv().await {
            self.handle_event(event);
        }
    }

    /// Whether a fetch, refetch, page reveal or keyword commit is outstanding.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
            || self.refetch_pending
            || self.revealing
            || self.pending_keyword.is_some()
    }

    /// What: Apply events until nothing is outstanding.
    ///
    /// Details:
    /// - Requires a running worker when a fetch is outstanding.
    pub async fn settle(&mut self) {
        while self.is_busy() {
            self.process_next_event().await;
        }
    }

    /// Invalidate derived state and fetch again under a new generation.
    fn begin_recompute(&mut self, reason: &'static str) {
        self.generation += 1;
        self.full_result.clear();
        self.window.clear();
        self.page_index = 0;
        self.has_more = false;
        self.revealing = false;
        self.error = None;
        self.phase = LoadPhase::Loading;
        if let Some(outstanding) = self.in_flight {
            debug!(
                reason,
                generation = self.generation,
                outstanding,
                "fetch in flight; refetch deferred"
            );
            self.refetch_pending = true;
        } else {
            debug!(reason, generation = self.generation, "recompute requested");
            self.dispatch();
        }
    }

    /// Send a request for the current generation.
    fn dispatch(&mut self) {
        let id = self.generation;
        if self.query_tx.send(CatalogQuery { id }).is_err() {
            warn!(generation = id, "catalog worker unavailable");
            self.error = Some("catalog worker unavailable".to_string());
            self.phase = LoadPhase::Failed;
            return;
        }
        self.in_flight = Some(id);
        self.requests_sent += 1;
    }

    /// Commit a debounced keyword if its timer is still the current one.
    fn commit_keyword(&mut self, seq: u64, text: String) {
        if seq != self.keyword_seq {
            debug!(seq, current = self.keyword_seq, "ignoring superseded keyword commit");
            return;
        }
        self.pending_keyword = None;
        if text == self.criteria.keyword {
            return;
        }
        self.criteria.keyword = text;
        self.begin_recompute("keyword");
    }

    /// Append the next page if the reveal still belongs to the current generation.
    fn reveal_page(&mut self, generation: u64) {
        if generation != self.generation || !self.revealing {
            debug!(generation, current = self.generation, "dropping stale page reveal");
            return;
        }
        self.revealing = false;
        let slice = next_slice(&self.full_result, self.options.page_size, self.page_index);
        self.window.extend(slice.items);
        self.page_index = slice.pages_revealed;
        self.has_more = slice.has_more;
    }

    /// Abort the armed debounce timer and invalidate any commit it already queued.
    fn cancel_pending_keyword(&mut self) {
        self.keyword_seq += 1;
        if let Some(handle) = self.pending_keyword.take() {
            handle.abort();
        }
    }
}

impl Drop for CatalogStore {
    fn drop(&mut self) {
        if let Some(handle) = self.pending_keyword.take() {
            handle.abort();
        }
    }
}
