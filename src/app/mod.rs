//! Application layer: wiring settings, sources, the worker and the store.

/// Plain-text and JSON rendering.
pub mod output;
/// Saving and restoring filter criteria between runs.
pub mod persist;
/// One-shot fetch, filter and print runtime.
mod runtime;
/// Background catalog fetch worker.
pub mod worker;

pub use runtime::{Result, apply_cli_criteria, resolve_settings, run};
pub use worker::spawn_catalog_worker;
