use serde::Deserialize;

use miruro_core::models::{AiringStatus, Anime, AnimeTitle, SearchPage};

// ── Response wrappers ────────────────────────────────────────────

/// Paginated list response shared by search and trending.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default)]
    pub has_next_page: bool,
    pub total_pages: Option<u32>,
    pub total_results: Option<u32>,
    #[serde(default)]
    pub results: Vec<ConsumetAnime>,
}

fn first_page() -> u32 {
    1
}

impl PageResponse {
    pub fn into_search_page(self) -> SearchPage {
        SearchPage {
            current_page: self.current_page,
            has_next_page: self.has_next_page,
            total_pages: self.total_pages,
            total_results: self.total_results,
            results: self.results.into_iter().map(|a| a.into_anime()).collect(),
        }
    }
}

// ── Media ────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ConsumetTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

/// One anime as the catalog sends it.
///
/// `id` arrives as a string from search but as a number from some mirrors,
/// and `episodes` is a count on list endpoints but an array of episode
/// objects on the info endpoint, so both are taken loosely.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumetAnime {
    pub id: serde_json::Value,
    #[serde(default)]
    pub title: Option<ConsumetTitle>,
    pub image: Option<String>,
    pub cover_image: Option<String>,
    pub color: Option<String>,
    pub status: Option<String>,
    pub total_episodes: Option<u32>,
    #[serde(default)]
    pub episodes: Option<serde_json::Value>,
    pub rating: Option<u32>,
    pub release_date: Option<serde_json::Value>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

impl ConsumetAnime {
    pub fn into_anime(self) -> Anime {
        let title = self.title.unwrap_or_default();
        let episodes = match self.episodes {
            Some(serde_json::Value::Number(n)) => n.as_u64().map(|n| n as u32),
            Some(serde_json::Value::Array(list)) => Some(list.len() as u32),
            _ => None,
        };
        Anime {
            id: value_to_id(&self.id),
            title: AnimeTitle {
                romaji: title.romaji,
                english: title.english,
                native: title.native,
            },
            image: self.image,
            cover_image: self.cover_image,
            color: self.color,
            status: self
                .status
                .map(AiringStatus::from)
                .unwrap_or_default(),
            total_episodes: self.total_episodes,
            episodes,
            rating: self.rating,
            release_date: self.release_date.as_ref().and_then(value_to_year),
            media_type: self.media_type,
        }
    }
}

fn value_to_id(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Release year, sent either as a number or a numeric string.
fn value_to_year(v: &serde_json::Value) -> Option<u32> {
    match v {
        serde_json::Value::Number(n) => n.as_u64().map(|n| n as u32),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_JSON: &str = r##"{
        "currentPage": 1,
        "hasNextPage": true,
        "totalPages": 40,
        "totalResults": 200,
        "results": [
            {
                "id": "21",
                "malId": 21,
                "title": {
                    "romaji": "ONE PIECE",
                    "english": "ONE PIECE",
                    "native": "ONE PIECE",
                    "userPreferred": "ONE PIECE"
                },
                "status": "Ongoing",
                "image": "https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx21.jpg",
                "cover": "https://s4.anilist.co/file/anilistcdn/media/anime/banner/21.jpg",
                "popularity": 500000,
                "totalEpisodes": 1100,
                "rating": 88,
                "genres": ["Action", "Adventure"],
                "color": "#e4a15d",
                "type": "TV",
                "releaseDate": 1999
            },
            {
                "id": 113415,
                "title": { "romaji": "Jujutsu Kaisen" },
                "status": "FINISHED",
                "episodes": 24,
                "releaseDate": "2020"
            }
        ]
    }"##;

    #[test]
    fn test_search_page_decodes() {
        let resp: PageResponse = serde_json::from_str(SEARCH_JSON).unwrap();
        let page = resp.into_search_page();

        assert_eq!(page.current_page, 1);
        assert!(page.has_next_page);
        assert_eq!(page.total_results, Some(200));
        assert_eq!(page.results.len(), 2);

        let op = &page.results[0];
        assert_eq!(op.id, "21");
        assert_eq!(op.status, AiringStatus::Ongoing);
        assert_eq!(op.episode_count(), Some(1100));
        assert_eq!(op.accent_color(), "#e4a15d");
        assert_eq!(op.media_type.as_deref(), Some("TV"));
        assert_eq!(op.release_date, Some(1999));
        assert!(op.cover_url().unwrap().ends_with("bx21.jpg"));
    }

    #[test]
    fn test_loose_fields() {
        let resp: PageResponse = serde_json::from_str(SEARCH_JSON).unwrap();
        let page = resp.into_search_page();
        let jjk = &page.results[1];

        assert_eq!(jjk.id, "113415");
        assert_eq!(jjk.status, AiringStatus::Completed);
        assert_eq!(jjk.episode_count(), Some(24));
        assert_eq!(jjk.release_date, Some(2020));
        assert_eq!(jjk.display_title(), "Jujutsu Kaisen");
        assert_eq!(jjk.score(), None);
    }

    #[test]
    fn test_info_episode_list_is_counted() {
        let json = r#"{
            "id": "1",
            "title": { "english": "Cowboy Bebop" },
            "episodes": [ { "id": "e1", "number": 1 }, { "id": "e2", "number": 2 } ]
        }"#;
        let anime = serde_json::from_str::<ConsumetAnime>(json)
            .unwrap()
            .into_anime();
        assert_eq!(anime.episodes, Some(2));
        assert_eq!(anime.status, AiringStatus::Unknown);
    }

    #[test]
    fn test_empty_page() {
        let resp: PageResponse = serde_json::from_str("{}").unwrap();
        let page = resp.into_search_page();
        assert_eq!(page.current_page, 1);
        assert!(!page.has_next_page);
        assert!(page.results.is_empty());
    }
}
