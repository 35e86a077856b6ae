use std::env;
use std::path::PathBuf;

/// Directory name used under every XDG base directory.
const APP_DIR: &str = "catalog-scroll";

/// What: Pick an XDG base directory from an explicit value or a `$HOME` fallback.
///
/// Inputs:
/// - `value`: Content of the XDG variable, if set
/// - `home`: Content of `$HOME`, if set
/// - `home_default`: Segments appended to `$HOME` when `value` is unset or blank
///
/// Output:
/// - Resolved base directory; `.` stands in for a missing `$HOME`.
fn resolve_base(value: Option<String>, home: Option<String>, home_default: &[&str]) -> PathBuf {
    if let Some(p) = value
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let mut base = PathBuf::from(home.unwrap_or_else(|| ".".to_string()));
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    resolve_base(env::var(var).ok(), env::var("HOME").ok(), home_default)
}

/// Config directory: `$XDG_CONFIG_HOME/catalog-scroll` (or `~/.config/catalog-scroll`).
#[must_use]
pub fn config_dir() -> PathBuf {
    xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR)
}

/// State directory: `$XDG_STATE_HOME/catalog-scroll` (or `~/.local/state/catalog-scroll`).
#[must_use]
pub fn state_dir() -> PathBuf {
    xdg_base_dir("XDG_STATE_HOME", &[".local", "state"]).join(APP_DIR)
}

/// Logs directory under the state dir (ensured to exist).
#[must_use]
pub fn logs_dir() -> PathBuf {
    let dir = state_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Default settings file location.
#[must_use]
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

/// Default preferences file location.
#[must_use]
pub fn preferences_path() -> PathBuf {
    state_dir().join("preferences.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Explicit XDG values win; blanks fall back to `$HOME`
    ///
    /// - Input: Set, blank and missing XDG values with and without `$HOME`
    /// - Output: The XDG value, `$HOME/.local/state`, and `./.config`
    fn resolve_base_precedence() {
        assert_eq!(
            resolve_base(Some("/xdg".into()), Some("/home/u".into()), &[".config"]),
            PathBuf::from("/xdg")
        );
        assert_eq!(
            resolve_base(Some("  ".into()), Some("/home/u".into()), &[".local", "state"]),
            PathBuf::from("/home/u/.local/state")
        );
        assert_eq!(
            resolve_base(None, None, &[".config"]),
            PathBuf::from("./.config")
        );
    }

    #[test]
    /// What: Files live under the app directory
    ///
    /// - Input: Default resolution
    /// - Output: Settings and preferences paths end with the app dir and file name
    fn file_names() {
        assert!(settings_path().ends_with("catalog-scroll/settings.toml"));
        assert!(preferences_path().ends_with("catalog-scroll/preferences.json"));
    }
}
