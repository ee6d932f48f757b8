use crate::errors::Result;
use crate::products::products_model::{Product, ProductDraft};

/// Trait for product repository operations. The repository owns the raw
/// collection; validation and field derivation happen in the service.
pub trait ProductRepositoryTrait: Send + Sync {
    /// Load the persisted collection; an empty store starts empty.
    /// A second call is a no-op.
    fn initialize(&self) -> Result<()>;

    /// Get all products
    fn get_all(&self) -> Result<Vec<Product>>;

    /// Get a product by id, `None` when absent
    fn get_by_id(&self, id: i64) -> Result<Option<Product>>;

    /// Assign the next id to `product`, append it, persist, and return the
    /// stored row.
    fn insert(&self, product: Product) -> Result<Product>;

    /// Replace the stored row with the same id; no-op (`None`) when absent.
    fn replace(&self, product: Product) -> Result<Option<Product>>;

    /// Delete a product; no cascade into categories or brands.
    fn delete(&self, id: i64) -> Result<usize>;

    /// Delete every product in `ids` with a single persist
    fn bulk_delete(&self, ids: &[i64]) -> Result<usize>;
}

/// Trait for product service operations, the boundary product-editing
/// surfaces talk to.
pub trait ProductServiceTrait: Send + Sync {
    fn get_all_products(&self) -> Result<Vec<Product>>;

    fn get_product(&self, id: i64) -> Result<Option<Product>>;

    /// Validate and normalize a form draft, derive pricing and category
    /// fields, and store the new product. `name`, `price` and
    /// `stock_quantity` are mandatory.
    fn create_product(&self, draft: ProductDraft) -> Result<Product>;

    /// Merge a form draft into an existing product with the same
    /// normalization and derivation rules; `None` when the id is absent.
    fn update_product(&self, id: i64, draft: ProductDraft) -> Result<Option<Product>>;

    fn delete_product(&self, id: i64) -> Result<usize>;

    fn bulk_delete_products(&self, ids: &[i64]) -> Result<usize>;
}
