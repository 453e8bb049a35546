//! Cover art downloaded once to the data directory and shown from disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use miruro_core::config::AppConfig;

/// State of a cover image for a given anime.
#[derive(Debug, Clone)]
pub enum CoverState {
    Loading,
    Loaded(PathBuf),
    Failed,
}

impl CoverState {
    /// Whether the image has settled one way or the other.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// In-memory map from anime id to its cover state.
#[derive(Debug, Default)]
pub struct CoverCache {
    pub states: HashMap<String, CoverState>,
}

impl CoverCache {
    pub fn get(&self, anime_id: &str) -> Option<&CoverState> {
        self.states.get(anime_id)
    }

    pub fn any_loading(&self) -> bool {
        self.states.values().any(|s| !s.is_settled())
    }
}

/// Directory for cached cover images.
pub fn covers_dir() -> PathBuf {
    AppConfig::data_dir().join("covers")
}

/// Expected file path for a cover image.
pub fn cover_path(anime_id: &str) -> PathBuf {
    covers_dir().join(cover_file_name(anime_id))
}

/// Catalog ids are usually numeric, but never trust them as path segments.
/// Anything outside `[A-Za-z0-9-]` is hex-escaped behind `_`, so distinct
/// ids never share a file.
fn cover_file_name(anime_id: &str) -> String {
    let mut name = String::with_capacity(anime_id.len() + 4);
    for byte in anime_id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            name.push(byte as char);
        } else {
            name.push_str(&format!("_{byte:02x}"));
        }
    }
    name.push_str(".jpg");
    name
}

/// Write `bytes` next to `path` and rename into place, so a failed write
/// never leaves a truncated cover under the final name.
async fn store_cover(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let partial = path.with_extension("jpg.part");
    if let Err(e) = tokio::fs::write(&partial, bytes).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e);
    }
    tokio::fs::rename(&partial, path).await
}

/// Download a cover image and save it to disk. Returns the saved path.
pub async fn fetch_cover(anime_id: String, url: String) -> Result<PathBuf, String> {
    let dir = covers_dir();
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = cover_path(&anime_id);

    let bytes = reqwest::get(&url)
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map_err(|e| e.to_string())?;

    store_cover(&path, &bytes)
        .await
        .map_err(|e| e.to_string())?;
    tracing::debug!(anime_id = %anime_id, path = %path.display(), "cover cached");
    Ok(path)
}
