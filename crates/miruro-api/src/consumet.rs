pub mod client;
pub mod error;
pub mod types;

pub use client::ConsumetClient;
pub use error::CatalogError;
