pub mod brands;
pub mod categories;
pub mod constants;
pub mod errors;
pub mod listing;
pub mod products;
pub mod storage;

pub use errors::{Error, Result};
pub use listing::query;
