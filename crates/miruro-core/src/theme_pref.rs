//! Persisted light/dark preference.
//!
//! Stored as the string `"dark"` or `"light"` under `themePreference` in a
//! small JSON key-value file next to the other per-user data.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::MiruroError;

pub const THEME_KEY: &str = "themePreference";
const FILE_NAME: &str = "preferences.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub const ALL: &[ThemeMode] = &[Self::Dark, Self::Light];

    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

impl FromStr for ThemeMode {
    type Err = MiruroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(MiruroError::Preferences(format!(
                "unknown theme preference: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => write!(f, "Dark"),
            Self::Light => write!(f, "Light"),
        }
    }
}

/// String key-value store backed by one JSON file.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl PreferenceStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "ignoring corrupt preferences: {e}");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    /// The store in the platform data directory.
    pub fn default_location() -> Self {
        Self::open(AppConfig::data_dir().join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set a value and write the whole store back to disk.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), MiruroError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn flush(&self) -> Result<(), MiruroError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// The stored theme, if any and if recognisable.
    pub fn theme(&self) -> Option<ThemeMode> {
        self.get(THEME_KEY).and_then(|s| s.parse().ok())
    }

    pub fn set_theme(&mut self, mode: ThemeMode) -> Result<(), MiruroError> {
        self.set(THEME_KEY, mode.as_str())
    }

    /// Stored preference first, otherwise whatever the OS reports.
    pub fn initial_theme(&self, system_prefers_dark: impl FnOnce() -> bool) -> ThemeMode {
        self.theme().unwrap_or_else(|| {
            if system_prefers_dark() {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("preferences.json");

        let mut store = PreferenceStore::open(&path);
        assert_eq!(store.theme(), None);
        store.set_theme(ThemeMode::Light).unwrap();

        let reopened = PreferenceStore::open(&path);
        assert_eq!(reopened.theme(), Some(ThemeMode::Light));
        assert_eq!(reopened.get(THEME_KEY), Some("light"));
    }

    #[test]
    fn test_initial_theme_prefers_stored_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = PreferenceStore::open(dir.path().join("p.json"));

        assert_eq!(store.initial_theme(|| true), ThemeMode::Dark);
        assert_eq!(store.initial_theme(|| false), ThemeMode::Light);

        store.set_theme(ThemeMode::Light).unwrap();
        assert_eq!(store.initial_theme(|| true), ThemeMode::Light);
    }

    #[test]
    fn test_unknown_value_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, r#"{ "themePreference": "sepia" }"#).unwrap();

        let store = PreferenceStore::open(&path);
        assert_eq!(store.theme(), None);
        assert_eq!(store.initial_theme(|| false), ThemeMode::Light);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, "not json").unwrap();

        let mut store = PreferenceStore::open(&path);
        assert_eq!(store.theme(), None);
        store.set_theme(ThemeMode::Dark).unwrap();
        assert_eq!(PreferenceStore::open(&path).theme(), Some(ThemeMode::Dark));
    }

    #[test]
    fn test_other_keys_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");

        let mut store = PreferenceStore::open(&path);
        store.set("autoplay", "true").unwrap();
        store.set_theme(ThemeMode::Light).unwrap();

        let reopened = PreferenceStore::open(&path);
        assert_eq!(reopened.get("autoplay"), Some("true"));
    }

    #[test]
    fn test_toggle_and_parse() {
        assert_eq!(ThemeMode::Dark.toggle(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
        assert_eq!("dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert!("Dark".parse::<ThemeMode>().is_err());
    }
}
