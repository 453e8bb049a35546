//! Persist and restore window size and position across sessions.
//!
//! Saves a small JSON file to `~/.local/share/miruro/window.json`
//! (or platform equivalent via `directories` crate).

use std::path::{Path, PathBuf};

use iced::{Point, Size};
use serde::{Deserialize, Serialize};

const FILE_NAME: &str = "window.json";

/// Persisted window geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            x: -1.0,
            y: -1.0,
        }
    }
}

impl WindowState {
    pub fn size(&self) -> Size {
        Size::new(self.width.max(360.0), self.height.max(300.0))
    }

    /// The saved position, if there is a valid one.
    pub fn position(&self) -> Option<Point> {
        if self.x >= 0.0 && self.y >= 0.0 {
            Some(Point::new(self.x, self.y))
        } else {
            None
        }
    }

    /// Load from disk, returning default if file doesn't exist or is invalid.
    pub fn load() -> Self {
        state_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save to disk. Errors are logged but not propagated.
    pub fn save(&self) {
        if let Some(path) = state_path() {
            self.save_to(&path);
        }
    }

    fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    tracing::warn!("Failed to save window state: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize window state: {e}"),
        }
    }
}

fn state_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "miruro").map(|dirs| dirs.data_dir().join(FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILE_NAME);
        let state = WindowState {
            width: 900.0,
            height: 700.0,
            x: 10.0,
            y: 20.0,
        };
        state.save_to(&path);
        assert_eq!(WindowState::load_from(&path), state);
        assert_eq!(state.position(), Some(Point::new(10.0, 20.0)));
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = WindowState::load_from(&dir.path().join("nope.json"));
        assert_eq!(loaded, WindowState::default());
        assert_eq!(loaded.position(), None);
    }

    #[test]
    fn test_size_is_clamped() {
        let tiny = WindowState {
            width: 10.0,
            height: 10.0,
            ..Default::default()
        };
        assert_eq!(tiny.size(), Size::new(360.0, 300.0));
    }
}
