//! Command-line argument definition.

use std::path::PathBuf;

use clap::Parser;

use super::utils::{parse_price, parse_sort_key};
use crate::state::SortKey;

/// catalog-scroll - browse a product catalog with pricing, price and keyword filters
#[derive(Parser, Debug, Default)]
#[command(name = "catalog-scroll")]
#[command(version)]
#[command(about = "Browse a product catalog with pricing, price and keyword filters", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Select the Paid pricing category (pricing flags replace saved selections)
    #[arg(long)]
    pub paid: bool,

    /// Select the Free pricing category (pricing flags replace saved selections)
    #[arg(long)]
    pub free: bool,

    /// Select the View Only pricing category (pricing flags replace saved selections)
    #[arg(long)]
    pub view_only: bool,

    /// Lower price bound for paid items (0-999)
    #[arg(long, value_parser = parse_price)]
    pub min_price: Option<f64>,

    /// Upper price bound for paid items (0-999)
    #[arg(long, value_parser = parse_price)]
    pub max_price: Option<f64>,

    /// Keyword matched against title and creator
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Sort order: name, price-desc or price-asc (price sorts need --paid)
    #[arg(short, long, value_parser = parse_sort_key)]
    pub sort: Option<SortKey>,

    /// Reset saved criteria to defaults before applying flags
    #[arg(long)]
    pub reset: bool,

    /// Number of pages to reveal
    #[arg(short, long, default_value_t = 1)]
    pub pages: usize,

    /// Items per page (overrides settings and environment)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Catalog endpoint (overrides settings and environment)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Neither load nor save criteria between runs
    #[arg(long)]
    pub no_persist: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Settings file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Whether any criteria flag was given.
    #[must_use]
    pub const fn has_criteria_flags(&self) -> bool {
        self.paid
            || self.free
            || self.view_only
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.keyword.is_some()
            || self.sort.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Criteria flags parse into typed values
    ///
    /// - Input: `--paid --min-price 10 --max-price 50 --sort price-asc -k linen --pages 3`
    /// - Output: Matching fields; `has_criteria_flags` true
    fn parses_criteria_flags() {
        let args = Args::try_parse_from([
            "catalog-scroll",
            "--paid",
            "--min-price",
            "10",
            "--max-price",
            "50",
            "--sort",
            "price-asc",
            "-k",
            "linen",
            "--pages",
            "3",
        ])
        .expect("valid args");
        assert!(args.paid);
        assert_eq!(args.min_price, Some(10.0));
        assert_eq!(args.max_price, Some(50.0));
        assert_eq!(args.sort, Some(SortKey::PriceAscending));
        assert_eq!(args.keyword.as_deref(), Some("linen"));
        assert_eq!(args.pages, 3);
        assert!(args.has_criteria_flags());
    }

    #[test]
    /// What: Invalid prices and sort keys are rejected at parse time
    ///
    /// - Input: `--min-price 1000`, `--sort cheapest`
    /// - Output: Parse errors
    fn rejects_invalid_values() {
        assert!(Args::try_parse_from(["catalog-scroll", "--min-price", "1000"]).is_err());
        assert!(Args::try_parse_from(["catalog-scroll", "--sort", "cheapest"]).is_err());
    }

    #[test]
    /// What: Defaults carry no criteria and reveal one page
    ///
    /// - Input: No flags
    /// - Output: `pages == 1`, `log_level == "info"`, no criteria flags
    fn defaults() {
        let args = Args::try_parse_from(["catalog-scroll"]).expect("no args");
        assert_eq!(args.pages, 1);
        assert_eq!(args.log_level, "info");
        assert!(!args.has_criteria_flags());
    }
}
