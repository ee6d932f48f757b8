use std::sync::Arc;

use catalog_core::brands::{BrandRepository, BrandRepositoryTrait};
use catalog_core::categories::{CategoryRepository, CategoryRepositoryTrait};
use catalog_core::products::{ProductRepository, ProductRepositoryTrait, ProductService};
use catalog_core::storage::{BackingStore, MemoryStore};

pub type TestProductService =
    ProductService<ProductRepository, CategoryRepository, BrandRepository>;

pub struct Catalog {
    pub store: Arc<MemoryStore>,
    pub categories: Arc<CategoryRepository>,
    pub brands: Arc<BrandRepository>,
    pub products: Arc<ProductRepository>,
    pub product_service: TestProductService,
}

/// Build a full catalog over one shared in-memory store, with an empty
/// category collection so tests control the tree.
pub fn empty_catalog() -> Catalog {
    let store = Arc::new(MemoryStore::new());
    store.set("categories", "[]").unwrap();
    catalog_over(store)
}

/// Build a catalog over an existing store, e.g. to simulate a reload.
pub fn catalog_over(store: Arc<MemoryStore>) -> Catalog {
    let categories = Arc::new(CategoryRepository::new(store.clone()));
    let brands = Arc::new(BrandRepository::new(store.clone()));
    let products = Arc::new(ProductRepository::new(store.clone()));
    categories.initialize().unwrap();
    brands.initialize().unwrap();
    products.initialize().unwrap();

    let product_service =
        ProductService::new(products.clone(), categories.clone(), brands.clone());

    Catalog {
        store,
        categories,
        brands,
        products,
        product_service,
    }
}
