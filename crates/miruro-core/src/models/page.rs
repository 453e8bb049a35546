use serde::{Deserialize, Serialize};

use super::Anime;

/// One page of catalog results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub current_page: u32,
    pub has_next_page: bool,
    pub total_pages: Option<u32>,
    pub total_results: Option<u32>,
    pub results: Vec<Anime>,
}
