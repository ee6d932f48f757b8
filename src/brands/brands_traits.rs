use crate::brands::brands_model::{Brand, BrandUpdate, NewBrand};
use crate::errors::Result;

/// Trait for brand repository operations
pub trait BrandRepositoryTrait: Send + Sync {
    /// Load the persisted collection; an empty store starts empty.
    /// A second call is a no-op.
    fn initialize(&self) -> Result<()>;

    /// Get all brands
    fn get_all(&self) -> Result<Vec<Brand>>;

    /// Get a brand by id, `None` when absent
    fn get_by_id(&self, id: i64) -> Result<Option<Brand>>;

    /// Create a new brand and persist the collection
    fn create(&self, new_brand: NewBrand) -> Result<Brand>;

    /// Merge a patch into the matching brand; no-op when the id is absent
    fn update(&self, id: i64, update: BrandUpdate) -> Result<Option<Brand>>;

    /// Delete a brand. Referencing products are deliberately left untouched.
    fn delete(&self, id: i64) -> Result<usize>;

    /// Delete every brand in `ids` with a single persist
    fn bulk_delete(&self, ids: &[i64]) -> Result<usize>;

    /// Flip `is_active` on the matching brand
    fn toggle_status(&self, id: i64) -> Result<Option<Brand>>;
}

/// Trait for brand service operations
pub trait BrandServiceTrait: Send + Sync {
    fn get_all_brands(&self) -> Result<Vec<Brand>>;
    fn get_brand(&self, id: i64) -> Result<Option<Brand>>;
    fn create_brand(&self, new_brand: NewBrand) -> Result<Brand>;
    fn update_brand(&self, id: i64, update: BrandUpdate) -> Result<Option<Brand>>;
    fn delete_brand(&self, id: i64) -> Result<usize>;
    fn bulk_delete_brands(&self, ids: &[i64]) -> Result<usize>;
    fn toggle_brand_status(&self, id: i64) -> Result<Option<Brand>>;
}
