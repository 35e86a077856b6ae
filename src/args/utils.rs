//! Shared utilities for argument processing.

use crate::state::{PRICE_MAX, SortKey};

/// What: Determine the log level from command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides the `log_level` argument.
#[must_use]
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Parse a price bound for clap.
///
/// Inputs:
/// - `s`: Raw argument
///
/// Output:
/// - Price within `[0, PRICE_MAX]`.
///
/// # Errors
/// - Returns a message when `s` is not a number in range.
pub fn parse_price(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{s}` is not a number"))?;
    if !(0.0..=PRICE_MAX).contains(&v) {
        return Err(format!("price must be between 0 and {PRICE_MAX}"));
    }
    Ok(v)
}

/// What: Parse a sort key for clap.
///
/// Inputs:
/// - `s`: Raw argument such as `name`, `price-desc` or `price-asc`
///
/// Output:
/// - Matching [`SortKey`].
///
/// # Errors
/// - Returns a message listing accepted values for unknown keys.
pub fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    SortKey::from_config_key(s)
        .ok_or_else(|| format!("unknown sort `{s}` (expected name, price-desc or price-asc)"))
}
