use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::products::products_model::StockStatus;

/// Sort orders offered by the catalog listing surfaces.
#[derive(PartialEq, Eq, Serialize, Deserialize, Debug, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    PriceAsc,
    PriceDesc,
    DiscountDesc,
    /// Id descending. Ids are assigned monotonically, so this is creation
    /// order.
    #[default]
    Newest,
}

/// Filter, sort and pagination criteria for one listing query. Omitted
/// facets impose no filter; facets are independent predicates AND-combined.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductQuery {
    /// Case-insensitive substring match on the product name
    pub search: Option<String>,
    pub status: Option<StockStatus>,
    pub category_id: Option<i64>,
    pub brand_id: Option<i64>,
    /// Shopper-facing gender/division facet, matched against the
    /// denormalized root category name
    pub division: Option<String>,
    /// Case-insensitive substring match on the denormalized subcategory name
    pub sub_category: Option<String>,
    /// Case-insensitive membership test on the denormalized brand name
    pub brand_names: Option<Vec<String>>,
    pub sort: SortOption,
    /// 1-indexed page number; values below 1 clamp to 1
    pub page: usize,
    /// Page size; values below 1 clamp to 1
    pub page_size: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        ProductQuery {
            search: None,
            status: None,
            category_id: None,
            brand_id: None,
            division: None,
            sub_category: None,
            brand_names: None,
            sort: SortOption::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of a filtered listing. `total` counts the whole filtered set,
/// not the page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}
