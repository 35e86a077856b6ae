use crate::state::{CatalogItem, FilterCriteria, PriceCategory, PriceRange, PricingSelections};

/// What: Keep items whose pricing category is selected.
///
/// Inputs:
/// - `items`: Candidate items
/// - `selections`: Selected categories
///
/// Output:
/// - Matching items in input order; every item when `selections` is empty.
#[must_use]
pub fn filter_by_pricing(items: Vec<CatalogItem>, selections: PricingSelections) -> Vec<CatalogItem> {
    if selections.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|it| selections.contains(it.price_category()))
        .collect()
}

/// What: Restrict paid items to a price interval.
///
/// Inputs:
/// - `items`: Candidate items
/// - `range`: Inclusive price interval
///
/// Output:
/// - Paid items inside `range` plus every non-paid item, in input order.
///
/// Details:
/// - Free and view-only items pass untouched; their inclusion is decided by the pricing stage.
#[must_use]
pub fn filter_by_price_range(items: Vec<CatalogItem>, range: PriceRange) -> Vec<CatalogItem> {
    items
        .into_iter()
        .filter(|it| it.price_category() != PriceCategory::Paid || range.contains(it.price))
        .collect()
}

/// What: Keep items whose title or creator contains the keyword.
///
/// Inputs:
/// - `items`: Candidate items
/// - `keyword`: Raw keyword; trimmed and lower-cased before matching
///
/// Output:
/// - Matching items in input order; every item when the trimmed keyword is empty.
#[must_use]
pub fn filter_by_keyword(items: Vec<CatalogItem>, keyword: &str) -> Vec<CatalogItem> {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|it| {
            it.title.to_lowercase().contains(&needle) || it.creator.to_lowercase().contains(&needle)
        })
        .collect()
}

/// What: Run the full filter pipeline and sort over a raw catalog.
///
/// Inputs:
/// - `items`: Raw catalog as fetched
/// - `criteria`: Current filter and sort criteria
///
/// Output:
/// - New vector of matching items in sort order; `items` is left untouched.
///
/// Details:
/// - Stages: pricing selection, price range (only while Paid is selected), keyword, stable sort.
/// - Deterministic: identical inputs always give identical output, ties included.
#[must_use]
pub fn apply_filters_and_sort(items: &[CatalogItem], criteria: &FilterCriteria) -> Vec<CatalogItem> {
    let mut filtered = filter_by_pricing(items.to_vec(), criteria.pricing_selections);
    if criteria.pricing_selections.contains(PriceCategory::Paid) {
        filtered = filter_by_price_range(filtered, criteria.price_range);
    }
    filtered = filter_by_keyword(filtered, &criteria.keyword);
    crate::logic::sort_items(&mut filtered, criteria.sort_key);
    filtered
}
