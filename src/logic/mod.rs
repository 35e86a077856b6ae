//! Pure catalog logic: filtering, sorting and page slicing.

pub mod filter;
pub mod paging;
pub mod sort;

// Re-export public APIs so callers can use crate::logic::...
pub use filter::{apply_filters_and_sort, filter_by_keyword, filter_by_price_range, filter_by_pricing};
pub use paging::{PageSlice, next_slice};
pub use sort::{name_cmp, sort_items};
