/// Backing-store key for the serialized category collection
pub const CATEGORIES_STORAGE_KEY: &str = "categories";

/// Backing-store key for the serialized brand collection
pub const BRANDS_STORAGE_KEY: &str = "brands";

/// Backing-store key for the serialized product collection
pub const PRODUCTS_STORAGE_KEY: &str = "products";

/// Default page size for catalog listings
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Stock quantity at or below which a product counts as low stock when the
/// form did not set an explicit status
pub const LOW_STOCK_THRESHOLD: u32 = 5;
