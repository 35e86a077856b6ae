//! Catalog state: data model and the store that owns filter criteria and results.

pub mod store;
pub mod types;

// Public re-exports so callers can use crate::state::...
pub use store::{
    CatalogStore, DEFAULT_KEYWORD_DEBOUNCE, DEFAULT_PAGE_SIZE, LoadPhase, StoreOptions,
    StoreSnapshot,
};
pub use types::{
    ApiItem, CatalogItem, CatalogQuery, CatalogResults, FilterCriteria, PRICE_MAX, PriceCategory,
    PriceRange, PricingSelections, SortKey, StoreEvent,
};
