use std::cmp::Reverse;

use crate::listing::listing_model::{Page, ProductQuery, SortOption};
use crate::products::products_model::Product;
use crate::products::products_pricing::discount_percent;

/// Run one listing query: AND-combined facet filters, then sort, then the
/// pagination window. Pure over its inputs; callers re-query after every
/// repository mutation.
pub fn query(products: &[Product], criteria: &ProductQuery) -> Page<Product> {
    let mut items: Vec<Product> = products
        .iter()
        .filter(|p| matches_all(p, criteria))
        .cloned()
        .collect();
    sort_products(&mut items, criteria.sort);
    paginate(items, criteria.page, criteria.page_size)
}

/// Every facet is an independent predicate, so their application order only
/// affects performance, never the result set.
fn matches_all(product: &Product, criteria: &ProductQuery) -> bool {
    matches_search(product, criteria)
        && matches_status(product, criteria)
        && matches_category(product, criteria)
        && matches_brand(product, criteria)
        && matches_division(product, criteria)
        && matches_subcategory(product, criteria)
        && matches_brand_names(product, criteria)
}

pub(crate) fn matches_search(product: &Product, criteria: &ProductQuery) -> bool {
    match &criteria.search {
        Some(needle) => product
            .name
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        None => true,
    }
}

pub(crate) fn matches_status(product: &Product, criteria: &ProductQuery) -> bool {
    criteria.status.map_or(true, |status| product.stock == status)
}

pub(crate) fn matches_category(product: &Product, criteria: &ProductQuery) -> bool {
    criteria
        .category_id
        .map_or(true, |id| product.category_id == Some(id))
}

pub(crate) fn matches_brand(product: &Product, criteria: &ProductQuery) -> bool {
    criteria
        .brand_id
        .map_or(true, |id| product.brand_id == Some(id))
}

pub(crate) fn matches_division(product: &Product, criteria: &ProductQuery) -> bool {
    match &criteria.division {
        Some(division) => product
            .category_name
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(division)),
        None => true,
    }
}

pub(crate) fn matches_subcategory(product: &Product, criteria: &ProductQuery) -> bool {
    match &criteria.sub_category {
        Some(needle) => product
            .subcategory_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&needle.to_lowercase())),
        None => true,
    }
}

pub(crate) fn matches_brand_names(product: &Product, criteria: &ProductQuery) -> bool {
    match &criteria.brand_names {
        Some(names) if !names.is_empty() => product.brand_name.as_deref().is_some_and(|brand| {
            names.iter().any(|name| name.eq_ignore_ascii_case(brand))
        }),
        _ => true,
    }
}

fn sort_products(products: &mut [Product], sort: SortOption) {
    match sort {
        SortOption::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOption::DiscountDesc => {
            products.sort_by_key(|p| Reverse(discount_percent(p.discount.as_deref())))
        }
        SortOption::Newest => products.sort_by_key(|p| Reverse(p.id)),
    }
}

fn paginate(items: Vec<Product>, page: usize, page_size: usize) -> Page<Product> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total = items.len();
    let items = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    Page {
        items,
        page,
        page_size,
        total,
    }
}
