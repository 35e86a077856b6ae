//! Cache-first decorator with serve-stale-on-error fallback.
use std::sync::Mutex;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::cache::ResponseCache;
use super::{CatalogError, CatalogSource};
use crate::state::CatalogItem;

/// Lookup key for the full catalog; the API has a single endpoint with no parameters.
const CATALOG_KEY: &str = "catalog";

/// Wraps a source with a freshness cache.
///
/// - Fresh hit: served without calling the inner source.
/// - Miss or stale: inner source called; success is cached.
/// - Inner failure: the last cached response of any age is served instead;
///   the error propagates only when nothing was ever cached.
#[derive(Debug)]
pub struct CachedSource<S> {
    /// Wrapped source.
    inner: S,
    /// Cached responses; never locked across an await.
    cache: Mutex<ResponseCache<Vec<CatalogItem>>>,
}

impl<S: CatalogSource> CachedSource<S> {
    /// What: Wrap `inner` with a cache.
    ///
    /// Inputs:
    /// - `inner`: Source to call on cache misses
    /// - `ttl`: Freshness window
    /// - `capacity`: Maximum cached keys
    ///
    /// Output:
    /// - Decorated source with an empty cache.
    pub fn new(inner: S, ttl: Duration, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(ResponseCache::new(ttl, capacity)),
        }
    }

    /// Drop every cached response.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    /// Wrapped source.
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Run `f` against the cache, tolerating a poisoned lock.
    fn with_cache<R>(&self, f: impl FnOnce(&mut ResponseCache<Vec<CatalogItem>>) -> R) -> R {
        match self.cache.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl<S: CatalogSource> CatalogSource for CachedSource<S> {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        if let Some(items) = self.with_cache(|c| c.get(CATALOG_KEY)) {
            debug!(items = items.len(), "serving catalog from fresh cache");
            return Ok(items);
        }
        match self.inner.fetch_catalog().await {
            Ok(items) => {
                self.with_cache(|c| c.set(CATALOG_KEY, items.clone()));
                Ok(items)
            }
            Err(err) => {
                warn!(error = %err, "catalog fetch failed");
                if let Some(items) = self.with_cache(|c| c.get_expired(CATALOG_KEY)) {
                    info!(items = items.len(), "using expired cached catalog due to error");
                    return Ok(items);
                }
                Err(err)
            }
        }
    }
}
