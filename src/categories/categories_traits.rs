use crate::categories::categories_model::{
    Category, CategoryUpdate, CategoryWithChildren, NewCategory,
};
use crate::errors::Result;

/// Trait for category repository operations
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Load the persisted collection, seeding the default set when the
    /// backing store is empty. A second call is a no-op.
    fn initialize(&self) -> Result<()>;

    /// Get all categories
    fn get_all(&self) -> Result<Vec<Category>>;

    /// Get a category by id, `None` when absent
    fn get_by_id(&self, id: i64) -> Result<Option<Category>>;

    /// Get all root categories (those with no parent)
    fn get_roots(&self) -> Result<Vec<Category>>;

    /// Get direct children of a category
    fn get_children(&self, parent_id: i64) -> Result<Vec<Category>>;

    /// Create a new category and persist the collection
    fn create(&self, new_category: NewCategory) -> Result<Category>;

    /// Merge a patch into the matching category; no-op when the id is absent
    fn update(&self, id: i64, update: CategoryUpdate) -> Result<Option<Category>>;

    /// Delete a category together with its direct children.
    /// Returns the number of removed entries.
    fn delete(&self, id: i64) -> Result<usize>;

    /// Flip `is_active` on the matching category
    fn toggle_status(&self, id: i64) -> Result<Option<Category>>;
}

/// Trait for category service operations
pub trait CategoryServiceTrait: Send + Sync {
    /// Get all categories organized hierarchically
    fn get_categories_hierarchical(&self) -> Result<Vec<CategoryWithChildren>>;

    /// Get all categories flat list
    fn get_all_categories(&self) -> Result<Vec<Category>>;

    /// Get a category by id
    fn get_category(&self, id: i64) -> Result<Option<Category>>;

    /// Create a new category
    fn create_category(&self, new_category: NewCategory) -> Result<Category>;

    /// Update a category
    fn update_category(&self, id: i64, update: CategoryUpdate) -> Result<Option<Category>>;

    /// Delete a category and its direct children
    fn delete_category(&self, id: i64) -> Result<usize>;

    /// Flip a category's active flag
    fn toggle_category_status(&self, id: i64) -> Result<Option<Category>>;
}
