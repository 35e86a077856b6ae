//! Catalog data sources: the remote API client and its response cache.

use std::future::Future;

use crate::state::CatalogItem;

pub mod cache;
pub mod cached;
pub mod http;

pub use cache::ResponseCache;
pub use cached::CachedSource;
pub use http::HttpCatalogSource;

/// Failure to obtain the catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Transport-level failure (connect, timeout, broken body).
    #[error("network error: {0}")]
    Network(String),
    /// The API answered with a non-success status.
    #[error("API request failed with status {0}")]
    Status(u16),
    /// The response body was not a valid catalog.
    #[error("failed to decode catalog: {0}")]
    Decode(String),
}

/// Anything that can deliver the full catalog in one call.
///
/// The store never assumes server-side filtering or paging; implementations
/// return every item and may cache as they see fit.
pub trait CatalogSource: Send + Sync {
    /// What: Fetch the complete catalog.
    ///
    /// Output:
    /// - `Ok(items)` on success; `Err(CatalogError)` when no usable data is available.
    fn fetch_catalog(&self) -> impl Future<Output = Result<Vec<CatalogItem>, CatalogError>> + Send;
}

impl<S: CatalogSource> CatalogSource for std::sync::Arc<S> {
    fn fetch_catalog(&self) -> impl Future<Output = Result<Vec<CatalogItem>, CatalogError>> + Send {
        (**self).fetch_catalog()
    }
}
