use tokio::sync::mpsc;

use super::output::{render_json, render_text};
use super::persist::{load_preferences, save_preferences};
use super::worker::spawn_catalog_worker;
use crate::args::Args;
use crate::config::{Settings, preferences_path, settings_path};
use crate::sources::{CachedSource, HttpCatalogSource};
use crate::state::{CatalogStore, FilterCriteria, LoadPhase, PriceCategory, PriceRange};

/// Result type alias for application-level errors.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Resolve settings from file, environment and command line.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
///
/// Output:
/// - Effective settings; CLI flags win over environment, environment over file.
///
/// # Errors
/// - Propagates `SettingsError` from loading or environment parsing.
pub fn resolve_settings(args: &Args) -> Result<Settings> {
    let path = args.config.clone().unwrap_or_else(settings_path);
    let mut settings = Settings::load(&path)?.with_env_overrides(|k| std::env::var(k).ok())?;
    if let Some(url) = &args.api_url {
        settings.api_url.clone_from(url);
    }
    if let Some(n) = args.page_size {
        settings.page_size = n.max(1);
    }
    Ok(settings)
}

/// What: Overlay command-line criteria flags on saved criteria.
///
/// Inputs:
/// - `criteria`: Criteria restored from preferences (or defaults)
/// - `args`: Parsed command-line arguments
///
/// Output:
/// - Criteria to fetch with.
///
/// Details:
/// - `--reset` starts from defaults.
/// - Any pricing flag replaces the saved selection with exactly the flagged categories.
/// - A price sort without `Paid` selected is dropped with a warning.
#[must_use]
pub fn apply_cli_criteria(criteria: FilterCriteria, args: &Args) -> FilterCriteria {
    let mut criteria = if args.reset {
        FilterCriteria::default()
    } else {
        criteria
    };
    if args.paid || args.free || args.view_only {
        let flagged = [
            (args.paid, PriceCategory::Paid),
            (args.free, PriceCategory::Free),
            (args.view_only, PriceCategory::ViewOnly),
        ];
        for (wanted, category) in flagged {
            if wanted != criteria.pricing_selections.contains(category) {
                criteria.toggle_pricing(category);
            }
        }
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        let current = criteria.price_range;
        criteria.price_range = PriceRange::new(
            args.min_price.unwrap_or_else(|| current.low()),
            args.max_price.unwrap_or_else(|| current.high()),
        );
    }
    if let Some(keyword) = &args.keyword {
        criteria.keyword.clone_from(keyword);
    }
    if let Some(sort) = args.sort
        && !criteria.set_sort(sort)
    {
        tracing::warn!(sort = %sort, "price sort ignored: --paid is not selected");
    }
    criteria.sanitized()
}

/// What: Fetch, filter and print the catalog once.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
///
/// Output:
/// - `Ok(())` after printing; `Err` when settings are invalid or the fetch failed.
///
/// # Errors
/// - Settings, HTTP client construction, JSON rendering, or a failed catalog fetch.
pub async fn run(args: &Args) -> Result<()> {
    let settings = resolve_settings(args)?;
    let persist = settings.persist_preferences && !args.no_persist;
    let prefs_path = preferences_path();
    tracing::debug!(
        api_url = %settings.api_url,
        page_size = settings.page_size,
        persist,
        criteria_flags = args.has_criteria_flags(),
        "settings resolved"
    );

    let http = HttpCatalogSource::new(
        settings.api_url.clone(),
        settings.connect_timeout(),
        settings.request_timeout(),
    )?;
    let source = CachedSource::new(http, settings.cache_ttl(), settings.cache_capacity);

    let saved = if persist {
        load_preferences(&prefs_path)
    } else {
        FilterCriteria::default()
    };
    let (query_tx, query_rx) = mpsc::unbounded_channel();
    let mut store = CatalogStore::new(settings.store_options(), query_tx)
        .with_criteria(apply_cli_criteria(saved, args));
    let worker = spawn_catalog_worker(source, query_rx, store.event_sender());

    store.refresh();
    store.settle().await;
    for _ in 1..args.pages {
        if !store.advance_page() {
            break;
        }
        store.settle().await;
    }

    let snap = store.snapshot();
    if args.json {
        println!("{}", render_json(&snap)?);
    } else {
        print!("{}", render_text(&snap));
    }
    if persist {
        let _ = save_preferences(&prefs_path, store.criteria());
    }

    drop(store);
    let _ = worker.await;
    match snap.phase {
        LoadPhase::Failed => Err(snap
            .error
            .unwrap_or_else(|| "catalog fetch failed".to_string())
            .into()),
        _ => Ok(()),
    }
}
