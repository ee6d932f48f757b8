pub mod brands_model;
pub mod brands_repository;
pub mod brands_service;
pub mod brands_traits;

pub use brands_model::{Brand, BrandUpdate, NewBrand};
pub use brands_repository::BrandRepository;
pub use brands_service::BrandService;
pub use brands_traits::{BrandRepositoryTrait, BrandServiceTrait};
