use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::MiruroError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub grid: GridConfig,
    pub appearance: AppearanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub dropdown_results: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub page_size: u32,
    pub scroll_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppearanceConfig {
    pub compact_width: f32,
}

impl AppConfig {
    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, MiruroError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(user_path: &Path) -> Result<Self, MiruroError> {
        if user_path.exists() {
            let user_str = std::fs::read_to_string(user_path)?;
            Self::from_toml_over_defaults(&user_str)
        } else {
            Self::from_toml_over_defaults("")
        }
    }

    /// Parse `user` on top of the built-in defaults. Tables and keys the
    /// user file omits keep their default values.
    pub fn from_toml_over_defaults(user: &str) -> Result<Self, MiruroError> {
        let mut merged: toml::Table =
            toml::from_str(DEFAULT_CONFIG).map_err(|e| MiruroError::Config(e.to_string()))?;
        let overrides: toml::Table =
            toml::from_str(user).map_err(|e| MiruroError::Config(e.to_string()))?;
        merge_tables(&mut merged, overrides);
        toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| MiruroError::Config(e.to_string()))
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), MiruroError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), MiruroError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| MiruroError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Per-user data directory: preferences, window geometry, covers, logs.
    pub fn data_dir() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.max(1))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "miruro")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(over_table)) => {
                merge_tables(base_table, over_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.search.debounce_ms, 100);
        assert_eq!(config.search.dropdown_results, 5);
        assert_eq!(config.grid.scroll_threshold, 1000.0);
        assert_eq!(config.appearance.compact_width, 500.0);
        assert_eq!(config.debounce(), Duration::from_millis(100));
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.api.base_url, config.api.base_url);
        assert_eq!(deserialized.grid.page_size, config.grid.page_size);
    }

    #[test]
    fn test_partial_user_file_keeps_defaults() {
        let config = AppConfig::from_toml_over_defaults(
            r#"
            [api]
            base_url = "http://localhost:3000"

            [search]
            debounce_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.search.dropdown_results, 5);
        assert_eq!(config.grid.page_size, 24);
    }

    #[test]
    fn test_saved_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.grid.page_size, 24);

        let mut config = AppConfig::default();
        config.grid.page_size = 48;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.grid.page_size, 48);
        assert_eq!(loaded.search.debounce_ms, 100);
    }

    #[test]
    fn test_invalid_user_file_is_an_error() {
        let err = AppConfig::from_toml_over_defaults("[search]\ndebounce_ms = \"soon\"");
        assert!(matches!(err, Err(MiruroError::Config(_))));
    }
}
