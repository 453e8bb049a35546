pub mod consumet;
pub mod traits;

pub use consumet::{CatalogError, ConsumetClient};
pub use traits::CatalogService;
