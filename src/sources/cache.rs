//! Keyed response cache with a freshness window and stale fallback.
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;

/// Default freshness window (60 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Default number of keys kept before the least recently used one is evicted.
pub const DEFAULT_CAPACITY: usize = 16;

/// Cache entry with data and the moment it was stored.
#[derive(Clone, Debug)]
struct CacheEntry<T> {
    /// Cached payload.
    data: T,
    /// When the entry was stored.
    stored_at: Instant,
}

/// Bounded cache mapping lookup keys to responses.
///
/// `get` only returns entries younger than the TTL; `get_expired` returns
/// whatever is stored regardless of age, for use as an error fallback.
#[derive(Debug)]
pub struct ResponseCache<T> {
    /// Entries by key, least recently used evicted first.
    entries: LruCache<String, CacheEntry<T>>,
    /// Freshness window.
    ttl: Duration,
}

impl<T: Clone> ResponseCache<T> {
    /// What: Create a cache.
    ///
    /// Inputs:
    /// - `ttl`: Freshness window
    /// - `capacity`: Maximum number of keys (values below 1 are treated as 1)
    ///
    /// Output:
    /// - Empty cache.
    #[must_use]
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            ttl,
        }
    }

    /// Store `data` under `key`, stamped with the current time.
    pub fn set(&mut self, key: &str, data: T) {
        self.set_at(key, data, Instant::now());
    }

    /// Store `data` under `key`, stamped with `now`.
    pub fn set_at(&mut self, key: &str, data: T, now: Instant) {
        self.entries.put(
            key.to_string(),
            CacheEntry {
                data,
                stored_at: now,
            },
        );
    }

    /// Fresh entry for `key`, if any.
    pub fn get(&mut self, key: &str) -> Option<T> {
        self.get_at(key, Instant::now())
    }

    /// What: Fresh entry for `key` as seen at `now`.
    ///
    /// Inputs:
    /// - `key`: Lookup key
    /// - `now`: Reference time
    ///
    /// Output:
    /// - `Some(data)` when stored less than `ttl` before `now`; `None` otherwise.
    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<T> {
        let entry = self.entries.get(key)?;
        if now.saturating_duration_since(entry.stored_at) < self.ttl {
            Some(entry.data.clone())
        } else {
            None
        }
    }

    /// Entry for `key` regardless of age.
    pub fn get_expired(&mut self, key: &str) -> Option<T> {
        self.entries.get(key).map(|e| e.data.clone())
    }

    /// Whether anything, fresh or not, is stored under `key`.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    /// Drop the entry for `key`.
    pub fn remove(&mut self, key: &str) {
        self.entries.pop(key);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> Default for ResponseCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY)
    }
}
