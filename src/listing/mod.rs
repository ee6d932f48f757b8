pub mod listing_engine;
pub mod listing_model;

pub use listing_engine::query;
pub use listing_model::{Page, ProductQuery, SortOption};
