use std::fs;
use std::path::Path;

use crate::state::FilterCriteria;

/// What: Load saved criteria from `path`.
///
/// Inputs:
/// - `path`: Preferences file
///
/// Output:
/// - Saved criteria (sanitized); defaults when the file is missing or corrupt.
pub fn load_preferences(path: &Path) -> FilterCriteria {
    let Ok(content) = fs::read_to_string(path) else {
        tracing::debug!(path = %path.display(), "[Persist] No saved preferences");
        return FilterCriteria::default();
    };
    match serde_json::from_str::<FilterCriteria>(&content) {
        Ok(criteria) => {
            tracing::debug!(path = %path.display(), "[Persist] Preferences restored");
            criteria.sanitized()
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "[Persist] Ignoring corrupt preferences file"
            );
            FilterCriteria::default()
        }
    }
}

/// What: Save criteria to `path`.
///
/// Inputs:
/// - `path`: Preferences file; its parent directory is created if needed
/// - `criteria`: Criteria to save
///
/// Output:
/// - `true` when written; failures are logged and reported as `false`.
pub fn save_preferences(path: &Path, criteria: &FilterCriteria) -> bool {
    let Ok(s) = serde_json::to_string_pretty(criteria) else {
        return false;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    tracing::debug!(
        path = %path.display(),
        bytes = s.len(),
        "[Persist] Writing preferences to disk"
    );
    match fs::write(path, &s) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "[Persist] Failed to write preferences"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PriceCategory, PriceRange, SortKey};

    #[test]
    /// What: Criteria survive a save/load cycle
    ///
    /// - Input: Paid+Free, range 10..50, keyword, price sort, saved into a nested dir
    /// - Output: Loaded criteria equal the saved ones
    fn preferences_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("preferences.json");
        let mut criteria = FilterCriteria::default();
        criteria.toggle_pricing(PriceCategory::Paid);
        criteria.toggle_pricing(PriceCategory::Free);
        criteria.price_range = PriceRange::new(10.0, 50.0);
        criteria.keyword = "linen".into();
        assert!(criteria.set_sort(SortKey::PriceAscending));

        assert!(save_preferences(&path, &criteria));
        assert_eq!(load_preferences(&path), criteria);
    }

    #[test]
    /// What: Missing or corrupt files yield defaults
    ///
    /// - Input: Absent path; file containing invalid JSON
    /// - Output: `FilterCriteria::default()` in both cases
    fn corrupt_or_missing_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("preferences.json");
        assert_eq!(load_preferences(&path), FilterCriteria::default());
        fs::write(&path, "{ not json").expect("write");
        assert_eq!(load_preferences(&path), FilterCriteria::default());
    }

    #[test]
    /// What: Hand-edited files cannot restore a price sort without Paid
    ///
    /// - Input: JSON with only Free selected and `price-descending` sort
    /// - Output: Sort restored as `ByName`
    fn loaded_preferences_are_sanitized() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("preferences.json");
        fs::write(
            &path,
            r#"{"pricing_selections":["free"],"sort_key":"price-descending"}"#,
        )
        .expect("write");
        let loaded = load_preferences(&path);
        assert_eq!(loaded.sort_key, SortKey::ByName);
        assert!(loaded.pricing_selections.contains(PriceCategory::Free));
    }

    #[test]
    /// What: Short sort names written by hand restore the whole criteria
    ///
    /// - Input: JSON with Paid selected, a price range, a keyword and `price-asc`
    /// - Output: Every field restored rather than falling back to defaults
    fn short_sort_name_restores_criteria() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("preferences.json");
        fs::write(
            &path,
            r#"{"pricing_selections":["paid"],"price_range":{"low":5,"high":80},"keyword":"wool","sort_key":"price-asc"}"#,
        )
        .expect("write");
        let loaded = load_preferences(&path);
        assert_eq!(loaded.sort_key, SortKey::PriceAscending);
        assert_eq!(loaded.keyword, "wool");
        assert_eq!(loaded.price_range, PriceRange::new(5.0, 80.0));
        assert!(loaded.pricing_selections.contains(PriceCategory::Paid));
    }
}
