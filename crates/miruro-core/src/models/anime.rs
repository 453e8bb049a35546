use serde::{Deserialize, Serialize};

/// Fallback accent used when the catalog provides no colour.
pub const DEFAULT_ACCENT: &str = "#999999";

/// Shown when every title variant is missing.
pub const UNTITLED: &str = "No Title";

/// A single title with language variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

impl AnimeTitle {
    /// Returns the best available display title.
    ///
    /// English wins over romaji; empty strings count as missing.
    pub fn preferred(&self) -> &str {
        non_empty(&self.english)
            .or(non_empty(&self.romaji))
            .or(non_empty(&self.native))
            .unwrap_or(UNTITLED)
    }

    /// The romaji variant, or an empty string.
    pub fn romaji_or_empty(&self) -> &str {
        self.romaji.as_deref().unwrap_or_default()
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.trim().is_empty())
}

/// Airing status as reported by the catalog.
///
/// The API mixes its own spelling with AniList's enum names, so both are
/// accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AiringStatus {
    Ongoing,
    Completed,
    Other(String),
    #[default]
    Unknown,
}

impl AiringStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ongoing => "Ongoing",
            Self::Completed => "Completed",
            Self::Other(s) => s.as_str(),
            Self::Unknown => "",
        }
    }
}

impl From<&str> for AiringStatus {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Ongoing" | "RELEASING" => Self::Ongoing,
            "Completed" | "FINISHED" => Self::Completed,
            "" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for AiringStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<AiringStatus> for String {
    fn from(status: AiringStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for AiringStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The anime record consumed for display. Owned by the catalog; never
/// mutated locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Anime {
    pub id: String,
    #[serde(default)]
    pub title: AnimeTitle,
    pub image: Option<String>,
    pub cover_image: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub status: AiringStatus,
    pub total_episodes: Option<u32>,
    pub episodes: Option<u32>,
    /// 0-100 scale.
    pub rating: Option<u32>,
    pub release_date: Option<u32>,
    pub media_type: Option<String>,
}

impl Anime {
    pub fn display_title(&self) -> &str {
        self.title.preferred()
    }

    /// Cover art URL: the dedicated cover, falling back to the poster image.
    pub fn cover_url(&self) -> Option<&str> {
        non_empty(&self.cover_image).or(non_empty(&self.image))
    }

    pub fn accent_color(&self) -> &str {
        non_empty(&self.color).unwrap_or(DEFAULT_ACCENT)
    }

    pub fn episode_count(&self) -> Option<u32> {
        self.total_episodes.or(self.episodes)
    }

    /// Rating rescaled to 0-10.
    pub fn score(&self) -> Option<f32> {
        self.rating.map(|r| r as f32 / 10.0)
    }
}

/// Shorten `title` to at most `max_chars` characters, appending `...` when
/// anything was cut.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    match title.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &title[..byte_idx]),
        None => title.to_string(),
    }
}
