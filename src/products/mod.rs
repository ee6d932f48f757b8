pub mod products_model;
pub mod products_pricing;
pub mod products_repository;
pub mod products_service;
pub mod products_traits;

pub use products_model::{Product, ProductDraft, ProductSeo, ProductVariants, StockStatus};
pub use products_pricing::{derive_discount, discount_percent, reconcile, PriceField, Pricing};
pub use products_repository::ProductRepository;
pub use products_service::ProductService;
pub use products_traits::{ProductRepositoryTrait, ProductServiceTrait};
