//! # Preference Store
//!
//! Persists the light/dark choice between runs in a small TOML file:
//!
//! ```toml
//! theme = "light"
//! ```
//!
//! On startup the stored value wins, then the `SCRAPEVIEW_COLOR_SCHEME`
//! environment signal, then dark (see [`scrapeview_core::theme::resolve_theme`]).
//! A broken preference file is logged and treated as absent.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use scrapeview_core::theme::resolve_theme;
use scrapeview_core::Theme;

use crate::error::{ClientError, ClientResult};

/// Environment variable consulted when nothing is stored.
pub const COLOR_SCHEME_ENV: &str = "SCRAPEVIEW_COLOR_SCHEME";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    theme: Option<Theme>,
}

/// File-backed theme preference.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ThemeStore { path: path.into() }
    }

    /// Store at the platform data directory, if one can be determined.
    pub fn at_default_location() -> ClientResult<Self> {
        Self::default_path()
            .map(Self::new)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No data directory available".into()))
    }

    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "scrapeview", "scrapeview")
            .map(|dirs| dirs.data_dir().join("preferences.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored theme, `None` when nothing was saved yet.
    pub fn load(&self) -> ClientResult<Option<Theme>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let prefs: Preferences = toml::from_str(&contents)?;
        Ok(prefs.theme)
    }

    pub fn save(&self, theme: Theme) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(&Preferences { theme: Some(theme) })?;
        std::fs::write(&self.path, contents)?;

        info!(%theme, path = ?self.path, "Theme saved");
        Ok(())
    }

    /// Startup theme: stored, then environment, then dark.
    pub fn restore(&self) -> Theme {
        let stored = self.load().unwrap_or_else(|e| {
            warn!("Ignoring unreadable preferences: {}", e);
            None
        });
        let theme = resolve_theme(stored, environment_theme());
        debug!(%theme, "Theme restored");
        theme
    }

    /// Flips `current` and persists the result.
    pub fn toggle(&self, current: Theme) -> ClientResult<Theme> {
        let next = current.toggled();
        self.save(next)?;
        Ok(next)
    }
}

/// Theme requested by the environment, if it names a known one.
pub fn environment_theme() -> Option<Theme> {
    std::env::var(COLOR_SCHEME_ENV).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_restore_defaults_to_dark() {
        std::env::remove_var(COLOR_SCHEME_ENV);
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("preferences.toml"));

        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.restore(), Theme::Dark);
    }

    #[test]
    #[serial]
    fn test_environment_used_when_nothing_stored() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("preferences.toml"));

        std::env::set_var(COLOR_SCHEME_ENV, "light");
        let restored = store.restore();
        std::env::remove_var(COLOR_SCHEME_ENV);

        assert_eq!(restored, Theme::Light);
    }

    #[test]
    #[serial]
    fn test_stored_value_beats_environment() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("nested").join("preferences.toml"));
        store.save(Theme::Dark).unwrap();

        std::env::set_var(COLOR_SCHEME_ENV, "light");
        let restored = store.restore();
        std::env::remove_var(COLOR_SCHEME_ENV);

        assert_eq!(restored, Theme::Dark);
    }

    #[test]
    #[serial]
    fn test_toggle_persists() {
        std::env::remove_var(COLOR_SCHEME_ENV);
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("preferences.toml"));

        let next = store.toggle(Theme::Dark).unwrap();
        assert_eq!(next, Theme::Light);
        assert_eq!(store.load().unwrap(), Some(Theme::Light));
        assert_eq!(ThemeStore::new(store.path()).restore(), Theme::Light);
    }

    #[test]
    #[serial]
    fn test_corrupt_file_is_treated_as_absent() {
        std::env::remove_var(COLOR_SCHEME_ENV);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        std::fs::write(&path, "theme = \"sepia\"").unwrap();

        let store = ThemeStore::new(path);
        assert!(store.load().is_err());
        assert_eq!(store.restore(), Theme::Dark);
    }
}
