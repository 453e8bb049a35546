mod anime;
mod page;

pub use anime::*;
pub use page::*;
