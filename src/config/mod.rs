//! Configuration: XDG path resolution and `settings.toml` loading.

/// Path resolution for config and state directories.
mod paths;
/// Settings file parsing and environment overrides.
mod settings;

pub use paths::{config_dir, logs_dir, preferences_path, settings_path, state_dir};
pub use settings::{DEFAULT_API_URL, ENV_API_URL, ENV_PAGE_SIZE, Settings, SettingsError};
