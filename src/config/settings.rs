use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::sources::cache;
use crate::state::{DEFAULT_KEYWORD_DEBOUNCE, DEFAULT_PAGE_SIZE, StoreOptions};

/// Catalog endpoint used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://closet-recruiting-api.azurewebsites.net/api/data";

/// Environment variable overriding `api_url`.
pub const ENV_API_URL: &str = "CATALOG_SCROLL_API_URL";

/// Environment variable overriding `page_size`.
pub const ENV_PAGE_SIZE: &str = "CATALOG_SCROLL_PAGE_SIZE";

/// Failure to load settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The settings file is not valid TOML for [`Settings`].
    #[error("invalid settings in {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying parse error.
        source: toml::de::Error,
    },
    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {var}")]
    Env {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
}

/// User-tunable settings read from `settings.toml`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Catalog endpoint.
    pub api_url: String,
    /// Items per revealed page.
    pub page_size: usize,
    /// Keyword debounce in milliseconds.
    pub keyword_debounce_ms: u64,
    /// Response cache freshness window in seconds.
    pub cache_ttl_secs: u64,
    /// Maximum cached responses.
    pub cache_capacity: usize,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Whether criteria are saved between runs.
    pub persist_preferences: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            keyword_debounce_ms: u64::try_from(DEFAULT_KEYWORD_DEBOUNCE.as_millis())
                .unwrap_or(500),
            cache_ttl_secs: cache::DEFAULT_TTL.as_secs(),
            cache_capacity: cache::DEFAULT_CAPACITY,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            persist_preferences: true,
        }
    }
}

impl Settings {
    /// What: Load settings from `path`.
    ///
    /// Inputs:
    /// - `path`: Settings file location
    ///
    /// Output:
    /// - Parsed settings; defaults when the file does not exist.
    ///
    /// # Errors
    /// - `SettingsError::Read` when the file exists but cannot be read.
    /// - `SettingsError::Parse` when the content is not valid settings TOML.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no settings file; using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// What: Apply environment overrides.
    ///
    /// Inputs:
    /// - `lookup`: Variable lookup, usually `|k| std::env::var(k).ok()`
    ///
    /// Output:
    /// - Settings with `api_url` and `page_size` replaced when their variables are set.
    ///
    /// # Errors
    /// - `SettingsError::Env` when the page size variable is not a positive integer.
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.page_size = n,
                _ => {
                    return Err(SettingsError::Env {
                        var: ENV_PAGE_SIZE,
                        value: raw,
                    });
                }
            }
        }
        Ok(self)
    }

    /// Store tunables derived from these settings.
    #[must_use]
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            page_size: self.page_size.max(1),
            keyword_debounce: Duration::from_millis(self.keyword_debounce_ms),
        }
    }

    /// Cache freshness window.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Connection timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Whole-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
