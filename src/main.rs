//! catalog-scroll binary entrypoint kept minimal. The runtime lives in `app`.

use std::fmt;
use std::process::ExitCode;
use std::sync::OnceLock;

use catalog_scroll::{app, args, config};
use clap::Parser;

/// Log timestamp formatter: local time as `YYYY-MM-DD-T HH:MM:SS`.
struct CatalogTimer;

impl tracing_subscriber::fmt::time::FormatTime for CatalogTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S").to_string();
        w.write_str(&ts)
    }
}

/// Keeps the non-blocking log writer flushing until process exit.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing to `<state dir>/logs/catalog-scroll.log`.
///
/// Inputs:
/// - `level`: Default filter when `RUST_LOG` is unset
///
/// Details:
/// - Falls back to stderr when the log file cannot be opened.
fn init_logging(level: &str) {
    let mut log_path = config::logs_dir();
    log_path.push("catalog-scroll.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(CatalogTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_timer(CatalogTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "catalog-scroll starting");
    let code = match app::run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Application error");
            eprintln!("catalog-scroll: {err}");
            ExitCode::FAILURE
        }
    };
    tracing::info!("catalog-scroll exited");
    code
}
