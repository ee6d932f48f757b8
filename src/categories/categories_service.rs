use std::sync::Arc;

use crate::categories::categories_model::{
    Category, CategoryUpdate, CategoryWithChildren, NewCategory,
};
use crate::categories::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::Result;

pub struct CategoryService<T: CategoryRepositoryTrait> {
    category_repo: Arc<T>,
}

impl<T: CategoryRepositoryTrait> CategoryService<T> {
    pub fn new(category_repo: Arc<T>) -> Self {
        CategoryService { category_repo }
    }

    /// Helper to organize categories into hierarchical structure
    fn organize_hierarchically(&self, categories: Vec<Category>) -> Vec<CategoryWithChildren> {
        let mut parents: Vec<Category> = categories
            .iter()
            .filter(|c| c.parent_id.is_none())
            .cloned()
            .collect();
        parents.sort_by_key(|c| c.order);

        parents
            .into_iter()
            .map(|parent| {
                let mut children: Vec<Category> = categories
                    .iter()
                    .filter(|c| c.parent_id == Some(parent.id))
                    .cloned()
                    .collect();
                children.sort_by_key(|c| c.order);

                CategoryWithChildren {
                    category: parent,
                    children,
                }
            })
            .collect()
    }
}

impl<T: CategoryRepositoryTrait> CategoryServiceTrait for CategoryService<T> {
    fn get_categories_hierarchical(&self) -> Result<Vec<CategoryWithChildren>> {
        let all_categories = self.category_repo.get_all()?;
        Ok(self.organize_hierarchically(all_categories))
    }

    fn get_all_categories(&self) -> Result<Vec<Category>> {
        self.category_repo.get_all()
    }

    fn get_category(&self, id: i64) -> Result<Option<Category>> {
        self.category_repo.get_by_id(id)
    }

    fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        self.category_repo.create(new_category)
    }

    fn update_category(&self, id: i64, update: CategoryUpdate) -> Result<Option<Category>> {
        self.category_repo.update(id, update)
    }

    fn delete_category(&self, id: i64) -> Result<usize> {
        self.category_repo.delete(id)
    }

    fn toggle_category_status(&self, id: i64) -> Result<Option<Category>> {
        self.category_repo.toggle_status(id)
    }
}
