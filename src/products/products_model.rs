use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock availability bucket shown on listing badges and used as a filter
/// facet.
#[derive(PartialEq, Eq, Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

/// Variant axes plus per-variant price overrides, keyed by variant name.
#[derive(PartialEq, Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariants {
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub prices: HashMap<String, Decimal>,
}

#[derive(PartialEq, Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductSeo {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
}

/// A catalog product. `category_id` stores the deepest chosen category node
/// (a subcategory when one was picked); `subcategory_id` repeats the child id
/// for fast lookup. `category_name`, `subcategory_name` and `brand_name` are
/// denormalized at write time and are what the shopper-facing listing facets
/// match against.
#[derive(PartialEq, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub category_name: Option<String>,
    pub subcategory_name: Option<String>,
    pub brand_name: Option<String>,
    pub stock: StockStatus,
    pub stock_quantity: u32,
    pub total_allowed_quantity: Option<u32>,
    pub minimum_order_quantity: Option<u32>,
    pub vendor_price: Option<Decimal>,
    pub margin: Option<Decimal>,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    /// Derived from `original_price`/`price`, e.g. "25% Off"; never edited
    /// directly.
    pub discount: Option<String>,
    #[serde(default)]
    pub variants: ProductVariants,
    pub flash_sale: bool,
    pub is_new: bool,
    pub is_featured: bool,
    pub is_visible: bool,
    pub cod_allowed: bool,
    pub returnable: bool,
    pub cancelable: bool,
    pub tax_included: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub seo: ProductSeo,
    #[serde(default)]
    pub related_products: Vec<i64>,
    pub rating: Option<Decimal>,
    pub review_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

/// Form payload for creating or updating a product. Numeric fields arrive as
/// the raw input strings and are parsed at the service boundary; on update,
/// omitted fields keep the stored value. `root_category_id`/`subcategory_id`
/// carry the cascading picker's output and are resolved before storing.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub root_category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub stock: Option<StockStatus>,
    pub stock_quantity: Option<String>,
    pub total_allowed_quantity: Option<String>,
    pub minimum_order_quantity: Option<String>,
    pub vendor_price: Option<String>,
    pub margin: Option<String>,
    pub price: Option<String>,
    pub original_price: Option<String>,
    pub variants: Option<ProductVariants>,
    pub flash_sale: Option<bool>,
    pub is_new: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_visible: Option<bool>,
    pub cod_allowed: Option<bool>,
    pub returnable: Option<bool>,
    pub cancelable: Option<bool>,
    pub tax_included: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub seo: Option<ProductSeo>,
    pub related_products: Option<Vec<i64>>,
}
