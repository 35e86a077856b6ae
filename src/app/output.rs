//! Plain-text and JSON rendering of a store snapshot.

use std::fmt::Write as _;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::state::{CatalogItem, LoadPhase, PriceCategory, StoreSnapshot};

/// Column width for titles.
const TITLE_WIDTH: usize = 36;
/// Column width for creators.
const CREATOR_WIDTH: usize = 20;

/// What: Truncate or pad `s` to exactly `width` display columns.
///
/// Inputs:
/// - `s`: Text, possibly containing wide characters
/// - `width`: Target display width
///
/// Output:
/// - String occupying `width` columns; truncated text ends with `…`.
fn fit(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w <= width {
        return format!("{s}{}", " ".repeat(width - w));
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw + 1 > width {
            break;
        }
        out.push(ch);
        used += cw;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Price cell: `$12.5` for paid items, the category label otherwise.
fn price_cell(item: &CatalogItem) -> String {
    match item.price_category() {
        PriceCategory::Paid => format!("${}", item.price),
        other => other.label().to_string(),
    }
}

/// What: Render a snapshot as a text table.
///
/// Inputs:
/// - `snap`: Store snapshot after settling
///
/// Output:
/// - Header with criteria and counts, one line per revealed item, and a footer
///   ("All data has been loaded", "No products found" or the error message).
#[must_use]
pub fn render_text(snap: &StoreSnapshot) -> String {
    let mut out = String::new();
    let c = &snap.criteria;
    let pricing = if c.pricing_selections.is_empty() {
        "any".to_string()
    } else {
        c.pricing_selections
            .categories()
            .iter()
            .map(|p| p.label())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let _ = writeln!(
        out,
        "Pricing: {pricing} | Price: {}-{} | Keyword: {:?} | Sort: {}",
        c.price_range.low(),
        c.price_range.high(),
        c.keyword,
        c.sort_key
    );
    let _ = writeln!(
        out,
        "{} items, showing {} ({} page{})",
        snap.total_count,
        snap.window.len(),
        snap.page_index,
        if snap.page_index == 1 { "" } else { "s" }
    );
    for item in &snap.window {
        let _ = writeln!(
            out,
            "{} {} {}",
            fit(&item.title, TITLE_WIDTH),
            fit(&item.creator, CREATOR_WIDTH),
            price_cell(item)
        );
    }
    match snap.phase {
        LoadPhase::Failed => {
            let _ = writeln!(out, "Error: {}", snap.error.as_deref().unwrap_or("unknown error"));
        }
        LoadPhase::Ready if snap.total_count == 0 => {
            out.push_str("No products found\n");
        }
        LoadPhase::Ready if !snap.has_more => {
            out.push_str("All data has been loaded\n");
        }
        LoadPhase::Idle | LoadPhase::Loading => {
            out.push_str("Loading...\n");
        }
        LoadPhase::Ready => {}
    }
    out
}

/// What: Render a snapshot as pretty JSON.
///
/// Inputs:
/// - `snap`: Store snapshot
///
/// Output:
/// - JSON document.
///
/// # Errors
/// - Returns the serializer error; not expected for well-formed snapshots.
pub fn render_json(snap: &StoreSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snap)
}
