use std::cmp::{Ordering, Reverse};

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::state::{CatalogItem, SortKey};

/// Collation key for a title: base letters, then accents, then case.
type NameKey = (String, String, Reverse<String>);

/// What: Build the collation key for a title.
///
/// Inputs:
/// - `title`: Display title
///
/// Output:
/// - Tuple of (accent- and case-folded text, case-folded text, raw text reversed).
///
/// Details:
/// - Decomposes to NFD and drops combining marks, so "Éclair" files under "e".
/// - Ties on base letters put unaccented before accented, then lowercase before uppercase.
fn name_key(title: &str) -> NameKey {
    let folded = title.to_lowercase();
    let base: String = folded.nfd().filter(|c| !is_combining_mark(*c)).collect();
    (base, folded.nfc().collect(), Reverse(title.to_string()))
}

/// What: Compare two titles the way a reader expects an alphabetical list.
///
/// Inputs:
/// - `a`, `b`: Titles to compare
///
/// Output:
/// - Ordering by base letters ignoring accents and case; accents, then case
///   (lowercase first), break ties.
#[must_use]
pub fn name_cmp(a: &str, b: &str) -> Ordering {
    name_key(a).cmp(&name_key(b))
}

/// What: Sort items in place by the given key.
///
/// Inputs:
/// - `items`: Items to sort
/// - `key`: Sort order
///
/// Output:
/// - `items` reordered; equal elements keep their relative order.
///
/// Details:
/// - Both sorts are stable, so ties (equal prices, identical titles) never shuffle between runs.
/// - Prices compare numerically; missing prices were already stored as `0`.
pub fn sort_items(items: &mut [CatalogItem], key: SortKey) {
    match key {
        SortKey::ByName => items.sort_by_cached_key(|it| name_key(&it.title)),
        SortKey::PriceDescending => items.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::PriceAscending => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str, price: f64) -> CatalogItem {
        CatalogItem::new(id, title, "maker", 0, price, "")
    }

    #[test]
    /// What: Equal prices keep their original relative order
    ///
    /// - Input: Two $20 items between cheaper and dearer ones, ascending sort
    /// - Output: The $20 items appear in input order
    fn price_sort_is_stable() {
        let mut items = vec![
            item("b", "B", 20.0),
            item("x", "X", 90.0),
            item("a", "A", 20.0),
            item("c", "C", 5.0),
        ];
        sort_items(&mut items, SortKey::PriceAscending);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a", "x"]);

        sort_items(&mut items, SortKey::PriceDescending);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "b", "a", "c"]);
    }

    #[test]
    /// What: Name sort ignores case and breaks case-only ties lowercase first
    ///
    /// - Input: "banana", "Apple", "apple", "Cherry"
    /// - Output: apple, Apple, banana, Cherry
    fn name_sort_is_case_insensitive() {
        let mut items = vec![
            item("1", "banana", 0.0),
            item("2", "Apple", 0.0),
            item("3", "apple", 0.0),
            item("4", "Cherry", 0.0),
        ];
        sort_items(&mut items, SortKey::ByName);
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["apple", "Apple", "banana", "Cherry"]);
    }

    #[test]
    /// What: Accented titles sort with their base letter
    ///
    /// - Input: "Zebra Tee", "Éclair Dress", "apple Hat", "eclair Cup"
    /// - Output: apple Hat, eclair Cup, Éclair Dress, Zebra Tee
    fn name_sort_folds_accents() {
        let mut items = vec![
            item("1", "Zebra Tee", 0.0),
            item("2", "Éclair Dress", 0.0),
            item("3", "apple Hat", 0.0),
            item("4", "eclair Cup", 0.0),
        ];
        sort_items(&mut items, SortKey::ByName);
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["apple Hat", "eclair Cup", "Éclair Dress", "Zebra Tee"]);
        assert_eq!(name_cmp("resume", "résumé"), Ordering::Less);
        assert_eq!(name_cmp("Été", "ete"), Ordering::Greater);
    }
}
