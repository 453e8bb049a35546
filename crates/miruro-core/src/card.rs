//! Presentation state and derived text for a single anime card.

use crate::models::{truncate_title, AiringStatus, Anime};
use crate::routes::Route;

/// Maximum characters of the main title line.
pub const TITLE_MAX_CHARS: usize = 35;
/// Maximum characters of the secondary romaji line.
pub const ROMAJI_MAX_CHARS: usize = 24;

/// Skeleton/hover state of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardState {
    loading: bool,
    hovered: bool,
}

impl Default for CardState {
    fn default() -> Self {
        Self {
            loading: true,
            hovered: false,
        }
    }
}

impl CardState {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn image_loaded(&mut self) {
        self.loading = false;
    }

    /// A broken cover still ends the skeleton; the card falls back to a
    /// placeholder frame.
    pub fn image_failed(&mut self) {
        self.loading = false;
    }

    pub fn hover_enter(&mut self) {
        self.hovered = true;
    }

    pub fn hover_exit(&mut self) {
        self.hovered = false;
    }

    /// Whether the hover overlay with extra details is visible.
    pub fn show_detail(&self) -> bool {
        self.hovered && !self.loading
    }
}

/// Small coloured dot next to the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    Ongoing,
    Completed,
}

impl StatusIndicator {
    pub fn for_status(status: &AiringStatus) -> Option<Self> {
        match status {
            AiringStatus::Ongoing => Some(Self::Ongoing),
            AiringStatus::Completed => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Everything a card renders, computed once per record.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub tooltip: String,
    pub romaji: String,
    pub indicator: Option<StatusIndicator>,
    pub release_year: Option<String>,
    pub episodes: Option<String>,
    pub score: Option<String>,
    pub media_type: Option<String>,
    pub accent: String,
    pub cover_url: Option<String>,
}

impl CardView {
    pub fn from_anime(anime: &Anime) -> Self {
        let title = anime.display_title();
        Self {
            id: anime.id.clone(),
            title: truncate_title(title, TITLE_MAX_CHARS),
            tooltip: format!("Title: {title}"),
            romaji: truncate_title(anime.title.romaji_or_empty(), ROMAJI_MAX_CHARS),
            indicator: StatusIndicator::for_status(&anime.status),
            release_year: anime.release_date.map(|y| y.to_string()),
            episodes: anime.episode_count().map(|e| e.to_string()),
            score: anime.score().map(format_score),
            media_type: anime.media_type.clone().filter(|t| !t.is_empty()),
            accent: anime.accent_color().to_string(),
            cover_url: anime.cover_url().map(str::to_string),
        }
    }
}

/// `9.1`, `8`, `10` — one decimal only when it carries information.
pub fn format_score(score: f32) -> String {
    let rounded = (score * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Where clicking a card goes.
pub fn watch_route(anime: &Anime) -> Route {
    Route::watch(anime.id.clone())
}
