//! Core value types used by the catalog store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound of the price slider domain.
pub const PRICE_MAX: f64 = 999.0;

/// Pricing category of a catalog item.
///
/// Always derived from the raw integer code sent by the API, never set on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceCategory {
    /// Item must be bought; `price` is meaningful.
    Paid,
    /// Item is free to use.
    Free,
    /// Item can only be viewed.
    ViewOnly,
}

impl PriceCategory {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Paid, Self::Free, Self::ViewOnly];

    /// What: Map the API's raw pricing code to a category.
    ///
    /// Inputs:
    /// - `raw`: Integer code from the API (`0`, `1`, `2` are canonical)
    ///
    /// Output:
    /// - `Paid` for `0`, `Free` for `1`, `ViewOnly` for `2`; anything else is `Free`.
    ///
    /// Details:
    /// - Total mapping; unknown codes are not an error.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        match raw {
            0 => Self::Paid,
            2 => Self::ViewOnly,
            _ => Self::Free,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Free => "Free",
            Self::ViewOnly => "View Only",
        }
    }

    /// What: Parse a category from a config/CLI key.
    ///
    /// Inputs:
    /// - `key`: Case-insensitive key such as `paid`, `free`, `view-only` or `View Only`
    ///
    /// Output:
    /// - `Some(category)` when recognized, `None` otherwise.
    #[must_use]
    pub fn from_config_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "paid" => Some(Self::Paid),
            "free" => Some(Self::Free),
            "view-only" | "viewonly" => Some(Self::ViewOnly),
            _ => None,
        }
    }

    /// Bit used by [`PricingSelections`].
    const fn bit(self) -> u8 {
        match self {
            Self::Paid => 0b001,
            Self::Free => 0b010,
            Self::ViewOnly => 0b100,
        }
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One product record as stored and displayed.
///
/// Construct through [`CatalogItem::new`] or from an [`ApiItem`] so that the
/// pricing category always follows the raw code.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CatalogItem {
    /// Opaque identifier, stable across fetches.
    pub id: String,
    /// Display title, matched by keyword.
    pub title: String,
    /// Creator name, matched by keyword.
    pub creator: String,
    /// Raw pricing code as delivered by the API.
    raw_price_category: i64,
    /// Derived category.
    price_category: PriceCategory,
    /// Non-negative price; only meaningful for paid items.
    pub price: f64,
    /// Display asset reference.
    pub image_path: String,
}

impl CatalogItem {
    /// What: Build an item, deriving its category from the raw code.
    ///
    /// Inputs:
    /// - `id`, `title`, `creator`, `image_path`: display fields
    /// - `raw_price_category`: API pricing code
    /// - `price`: Price; negative or non-finite values are stored as `0`
    ///
    /// Output:
    /// - A new `CatalogItem`.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        creator: impl Into<String>,
        raw_price_category: i64,
        price: f64,
        image_path: impl Into<String>,
    ) -> Self {
        let price = if price.is_finite() && price > 0.0 {
            price
        } else {
            0.0
        };
        Self {
            id: id.into(),
            title: title.into(),
            creator: creator.into(),
            raw_price_category,
            price_category: PriceCategory::from_raw(raw_price_category),
            price,
            image_path: image_path.into(),
        }
    }

    /// Raw pricing code from the API.
    #[must_use]
    pub const fn raw_price_category(&self) -> i64 {
        self.raw_price_category
    }

    /// Category derived from the raw code.
    #[must_use]
    pub const fn price_category(&self) -> PriceCategory {
        self.price_category
    }
}

/// Wire shape of one item in the API response.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiItem {
    /// Item identifier.
    pub id: String,
    /// Creator name.
    #[serde(default)]
    pub creator: String,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Raw pricing code.
    #[serde(default)]
    pub pricing_option: i64,
    /// Image reference.
    #[serde(default)]
    pub image_path: String,
    /// Price; missing or null is treated as zero.
    #[serde(default)]
    pub price: Option<f64>,
}

impl From<ApiItem> for CatalogItem {
    fn from(item: ApiItem) -> Self {
        Self::new(
            item.id,
            item.title,
            item.creator,
            item.pricing_option,
            item.price.unwrap_or(0.0),
            item.image_path,
        )
    }
}

/// Set of selected pricing categories. Empty means no pricing filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PricingSelections(u8);

impl PricingSelections {
    /// What: Build a selection from a list of categories.
    ///
    /// Inputs:
    /// - `categories`: Categories to select (duplicates are harmless)
    ///
    /// Output:
    /// - Selection containing exactly those categories.
    #[must_use]
    pub fn from_categories(categories: &[PriceCategory]) -> Self {
        Self(categories.iter().fold(0, |acc, c| acc | c.bit()))
    }

    /// Whether `category` is selected.
    #[must_use]
    pub const fn contains(self, category: PriceCategory) -> bool {
        self.0 & category.bit() != 0
    }

    /// Whether no category is selected.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Flip `category`; returns whether it is selected afterwards.
    pub const fn toggle(&mut self, category: PriceCategory) -> bool {
        self.0 ^= category.bit();
        self.contains(category)
    }

    /// Selected categories in display order.
    #[must_use]
    pub fn categories(self) -> Vec<PriceCategory> {
        PriceCategory::ALL
            .into_iter()
            .filter(|c| self.contains(*c))
            .collect()
    }
}

impl Serialize for PricingSelections {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.categories().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PricingSelections {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let categories = Vec::<PriceCategory>::deserialize(deserializer)?;
        Ok(Self::from_categories(&categories))
    }
}

/// Inclusive price interval applied to paid items.
///
/// Invariant: `0 <= low <= high <= PRICE_MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PriceRange {
    /// Lower bound (inclusive).
    low: f64,
    /// Upper bound (inclusive).
    high: f64,
}

impl PriceRange {
    /// What: Build a range from two bounds in either order.
    ///
    /// Inputs:
    /// - `a`, `b`: Bounds; clamped into `[0, PRICE_MAX]`, non-finite values clamp to the nearer end
    ///
    /// Output:
    /// - Range with `low <= high`.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        let a = clamp_price(a);
        let b = clamp_price(b);
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// Lower bound.
    #[must_use]
    pub const fn low(self) -> f64 {
        self.low
    }

    /// Upper bound.
    #[must_use]
    pub const fn high(self) -> f64 {
        self.high
    }

    /// Whether `price` lies within the range, bounds included.
    #[must_use]
    pub fn contains(self, price: f64) -> bool {
        price >= self.low && price <= self.high
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            low: 0.0,
            high: PRICE_MAX,
        }
    }
}

impl<'de> Deserialize<'de> for PriceRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            low: f64,
            high: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(Self::new(raw.low, raw.high))
    }
}

/// Clamp a price into the slider domain.
fn clamp_price(v: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, PRICE_MAX)
}

/// Sort order of the result list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Title ascending (default).
    #[default]
    #[serde(rename = "name", alias = "by-name")]
    ByName,
    /// Highest price first.
    #[serde(rename = "price-desc", alias = "price-descending")]
    PriceDescending,
    /// Lowest price first.
    #[serde(rename = "price-asc", alias = "price-ascending")]
    PriceAscending,
}

impl SortKey {
    /// Whether this key orders by price.
    #[must_use]
    pub const fn is_price_based(self) -> bool {
        matches!(self, Self::PriceDescending | Self::PriceAscending)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ByName => "Item Name",
            Self::PriceDescending => "Higher Price",
            Self::PriceAscending => "Lower Price",
        }
    }

    /// What: Parse a sort key from a config/CLI key.
    ///
    /// Inputs:
    /// - `key`: Case-insensitive key (`name`, `price-desc`, `price-asc` and a few aliases)
    ///
    /// Output:
    /// - `Some(SortKey)` when recognized, `None` otherwise.
    #[must_use]
    pub fn from_config_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "name" | "by-name" | "item-name" | "title" => Some(Self::ByName),
            "price-desc" | "price-descending" | "higher-price" | "high" => {
                Some(Self::PriceDescending)
            }
            "price-asc" | "price-ascending" | "lower-price" | "low" => Some(Self::PriceAscending),
            _ => None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User-chosen filter and sort state, one per session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Selected pricing categories; empty passes everything.
    pub pricing_selections: PricingSelections,
    /// Price interval, consulted only while `Paid` is selected.
    pub price_range: PriceRange,
    /// Keyword as committed; trimmed and lower-cased when matching.
    pub keyword: String,
    /// Sort order.
    pub sort_key: SortKey,
}

impl FilterCriteria {
    /// What: Flip a pricing category, enforcing the sort invariant.
    ///
    /// Inputs:
    /// - `category`: Category to toggle
    ///
    /// Output:
    /// - Updates `pricing_selections`; resets `sort_key` to `ByName` when `Paid` ends up deselected.
    pub fn toggle_pricing(&mut self, category: PriceCategory) {
        let selected = self.pricing_selections.toggle(category);
        if category == PriceCategory::Paid && !selected {
            self.sort_key = SortKey::ByName;
        }
    }

    /// What: Change the sort key if allowed.
    ///
    /// Inputs:
    /// - `key`: Requested sort key
    ///
    /// Output:
    /// - `true` when applied; `false` for a price sort while `Paid` is not selected.
    pub fn set_sort(&mut self, key: SortKey) -> bool {
        if key.is_price_based() && !self.pricing_selections.contains(PriceCategory::Paid) {
            return false;
        }
        self.sort_key = key;
        true
    }

    /// What: Restore criteria loaded from disk, repairing a broken sort invariant.
    ///
    /// Output:
    /// - Criteria where a price sort implies `Paid` is selected.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.sort_key.is_price_based()
            && !self.pricing_selections.contains(PriceCategory::Paid)
        {
            self.sort_key = SortKey::ByName;
        }
        self
    }
}

/// Fetch request sent to the background catalog worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Generation the request belongs to; echoed back in [`CatalogResults`].
    pub id: u64,
}

/// Outcome of a prior [`CatalogQuery`].
#[derive(Clone, Debug)]
pub struct CatalogResults {
    /// Echoed identifier from the originating query.
    pub id: u64,
    /// Raw catalog or a human-readable error message.
    pub outcome: Result<Vec<CatalogItem>, String>,
}

/// Messages processed by the store's event loop.
#[derive(Clone, Debug)]
pub enum StoreEvent {
    /// Worker finished a fetch.
    Results(CatalogResults),
    /// Debounce timer for keyword input fired.
    KeywordCommit {
        /// Keystroke sequence number the timer was armed for.
        seq: u64,
        /// Keyword text to commit.
        text: String,
    },
    /// Deferred materialization of the next page.
    RevealPage {
        /// Generation the reveal was requested under.
        generation: u64,
    },
}
