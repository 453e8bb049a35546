//! Trait definition for the anime catalog collaborator.
//!
//! The GUI only talks to the catalog through this trait, so the concrete
//! HTTP client can be swapped (or faked in tests) without touching screens.

use std::future::Future;

use miruro_core::models::{Anime, SearchPage};

/// A paginated, read-only anime catalog.
pub trait CatalogService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Search for anime by title.
    fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<SearchPage, Self::Error>> + Send;

    /// Currently trending anime, used to fill the home grid.
    fn trending(
        &self,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<SearchPage, Self::Error>> + Send;

    /// Full record for one anime.
    fn info(&self, id: &str) -> impl Future<Output = Result<Anime, Self::Error>> + Send;
}
