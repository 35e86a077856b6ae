//! Fixed-size page slicing over a filtered and sorted result.

use crate::state::CatalogItem;

/// One step of window growth.
#[derive(Clone, Debug, PartialEq)]
pub struct PageSlice {
    /// Items to append to the window.
    pub items: Vec<CatalogItem>,
    /// Pages revealed after appending `items`.
    pub pages_revealed: usize,
    /// Whether further items remain beyond this slice.
    pub has_more: bool,
}

/// What: Compute the next page of `full_result`.
///
/// Inputs:
/// - `full_result`: Filtered and sorted items
/// - `page_size`: Items per page (values below 1 are treated as 1)
/// - `pages_revealed`: Pages already materialized
///
/// Output:
/// - `PageSlice` with the items of page `pages_revealed`, the new page count and `has_more`.
///
/// Details:
/// - Once the result is exhausted returns an empty slice, leaves the page count unchanged
///   and reports `has_more = false`.
/// - Callers restart from `pages_revealed = 0` whenever the result is recomputed.
#[must_use]
pub fn next_slice(full_result: &[CatalogItem], page_size: usize, pages_revealed: usize) -> PageSlice {
    let page_size = page_size.max(1);
    let start = pages_revealed.saturating_mul(page_size);
    if start >= full_result.len() {
        return PageSlice {
            items: Vec::new(),
            pages_revealed,
            has_more: false,
        };
    }
    let end = start.saturating_add(page_size).min(full_result.len());
    PageSlice {
        items: full_result[start..end].to_vec(),
        pages_revealed: pages_revealed + 1,
        has_more: end < full_result.len(),
    }
}
