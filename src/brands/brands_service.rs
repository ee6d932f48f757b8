use std::sync::Arc;

use crate::brands::brands_model::{Brand, BrandUpdate, NewBrand};
use crate::brands::brands_traits::{BrandRepositoryTrait, BrandServiceTrait};
use crate::errors::Result;

pub struct BrandService<T: BrandRepositoryTrait> {
    brand_repo: Arc<T>,
}

impl<T: BrandRepositoryTrait> BrandService<T> {
    pub fn new(brand_repo: Arc<T>) -> Self {
        BrandService { brand_repo }
    }
}

impl<T: BrandRepositoryTrait> BrandServiceTrait for BrandService<T> {
    fn get_all_brands(&self) -> Result<Vec<Brand>> {
        self.brand_repo.get_all()
    }

    fn get_brand(&self, id: i64) -> Result<Option<Brand>> {
        self.brand_repo.get_by_id(id)
    }

    fn create_brand(&self, new_brand: NewBrand) -> Result<Brand> {
        self.brand_repo.create(new_brand)
    }

    fn update_brand(&self, id: i64, update: BrandUpdate) -> Result<Option<Brand>> {
        self.brand_repo.update(id, update)
    }

    /// Deleting a brand leaves referencing products untouched; their
    /// `brand_id` dangles until the product is edited again.
    fn delete_brand(&self, id: i64) -> Result<usize> {
        self.brand_repo.delete(id)
    }

    fn bulk_delete_brands(&self, ids: &[i64]) -> Result<usize> {
        self.brand_repo.bulk_delete(ids)
    }

    fn toggle_brand_status(&self, id: i64) -> Result<Option<Brand>> {
        self.brand_repo.toggle_status(id)
    }
}
