use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Directory holding the configuration document, settings and log file.
///
/// `$XDG_CONFIG_HOME` wins over the platform default so the location can be
/// redirected on every OS.
pub fn config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|base| base.join(APP_DIR))
}

const APP_DIR: &str = "dirdeck";

pub const CONFIG_FILE: &str = "config.json";
pub const SETTINGS_FILE: &str = "settings.toml";
pub const LOG_FILE: &str = "dirdeck.log";

/// How often the tick event fires (ms).
pub const TICK_RATE_MS: u64 = 250;

/// How long a status message stays on screen (s).
pub const STATUS_TTL_SECS: u64 = 6;

/// Source-root watcher debounce interval (ms).
pub const DEBOUNCE_MS: u64 = 300;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Expand a leading `~` to the home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

// ---------------------------------------------------------------------------
// UI settings (settings.toml)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    pub display: Option<DisplaySettings>,
    pub watch: Option<WatchSettings>,
    pub log: Option<LogSettings>,
}

#[derive(Debug, Deserialize)]
pub struct DisplaySettings {
    pub tick_rate: Option<u64>,
    pub status_ttl: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct WatchSettings {
    /// Set to false to stop rescanning when the source root changes on disk.
    pub enabled: Option<bool>,
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// An `EnvFilter` directive, e.g. "debug" or "dirdeck=trace".
    pub level: Option<String>,
}

impl Settings {
    pub fn tick_rate(&self) -> u64 {
        self.display
            .as_ref()
            .and_then(|d| d.tick_rate)
            .unwrap_or(TICK_RATE_MS)
    }

    pub fn status_ttl(&self) -> u64 {
        self.display
            .as_ref()
            .and_then(|d| d.status_ttl)
            .unwrap_or(STATUS_TTL_SECS)
    }

    pub fn watch_enabled(&self) -> bool {
        self.watch
            .as_ref()
            .and_then(|w| w.enabled)
            .unwrap_or(true)
    }

    pub fn debounce_ms(&self) -> u64 {
        self.watch
            .as_ref()
            .and_then(|w| w.debounce_ms)
            .unwrap_or(DEBOUNCE_MS)
    }

    pub fn log_level(&self) -> &str {
        self.log
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// Load `settings.toml` from the given directory.
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(dir: &Path) -> Settings {
    let path = dir.join(SETTINGS_FILE);
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        toml::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_settings_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings(dir.path());
        assert_eq!(s.tick_rate(), TICK_RATE_MS);
        assert_eq!(s.status_ttl(), STATUS_TTL_SECS);
        assert!(s.watch_enabled());
        assert_eq!(s.debounce_ms(), DEBOUNCE_MS);
        assert_eq!(s.log_level(), "info");
    }

    #[test]
    fn partial_settings_override_only_given_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "[watch]\nenabled = false\n\n[log]\nlevel = \"debug\"\n",
        )
        .unwrap();
        let s = load_settings(dir.path());
        assert!(!s.watch_enabled());
        assert_eq!(s.debounce_ms(), DEBOUNCE_MS);
        assert_eq!(s.log_level(), "debug");
        assert_eq!(s.tick_rate(), TICK_RATE_MS);
    }

    #[test]
    fn unparsable_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "[display\ntick_rate = ").unwrap();
        assert_eq!(load_settings(dir.path()).tick_rate(), TICK_RATE_MS);
    }

    #[test]
    fn expand_home_leaves_plain_paths_alone() {
        assert_eq!(expand_home("/srv/code"), PathBuf::from("/srv/code"));
        assert_eq!(expand_home("rel/~x"), PathBuf::from("rel/~x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/src"), home.join("src"));
            assert_eq!(expand_home("~"), home);
        }
    }
}
