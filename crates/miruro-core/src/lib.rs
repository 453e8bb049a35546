pub mod card;
pub mod config;
pub mod debounce;
pub mod error;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod search_bar;
pub mod shortcuts;
pub mod theme_pref;
