use serde::{Deserialize, Serialize};

use crate::categories::categories_model::Category;
use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::errors::Result;

/// How a stored `category_id` maps onto the two cooperating pickers: the
/// root-level choice and the optional subcategory under it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySelection {
    pub root_category_id: i64,
    pub subcategory_id: Option<i64>,
}

/// What a picker selection becomes when written back onto a product:
/// the deepest chosen node wins the `category_id` slot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCategory {
    pub category_id: i64,
    pub subcategory_id: Option<i64>,
}

/// Reconcile a product's stored `category_id` against the tree. A stored id
/// that points at a child is re-expressed as its parent (the effective root)
/// plus itself as subcategory; a root id stands alone. Returns `None` when
/// the id no longer exists (e.g. after a cascade delete).
pub fn classify(
    category_id: i64,
    repo: &dyn CategoryRepositoryTrait,
) -> Result<Option<CategorySelection>> {
    let Some(category) = repo.get_by_id(category_id)? else {
        return Ok(None);
    };
    Ok(Some(match category.parent_id {
        Some(parent_id) => CategorySelection {
            root_category_id: parent_id,
            subcategory_id: Some(category_id),
        },
        None => CategorySelection {
            root_category_id: category_id,
            subcategory_id: None,
        },
    }))
}

/// Collapse a picker selection back into the stored representation.
/// Choosing a subcategory commits both levels; choosing a childless root
/// commits immediately with no subcategory.
pub fn resolve_for_save(root_category_id: i64, subcategory_id: Option<i64>) -> ResolvedCategory {
    match subcategory_id {
        Some(subcategory_id) => ResolvedCategory {
            category_id: subcategory_id,
            subcategory_id: Some(subcategory_id),
        },
        None => ResolvedCategory {
            category_id: root_category_id,
            subcategory_id: None,
        },
    }
}

/// Active root categories in display order, the first-level picker list.
pub fn root_options(repo: &dyn CategoryRepositoryTrait) -> Result<Vec<Category>> {
    Ok(repo
        .get_roots()?
        .into_iter()
        .filter(|c| c.is_active)
        .collect())
}

/// Active children of a root in display order, the cascading second-level
/// list. Empty when the root has no children, in which case the picker
/// commits the root alone.
pub fn child_options(
    repo: &dyn CategoryRepositoryTrait,
    root_category_id: i64,
) -> Result<Vec<Category>> {
    Ok(repo
        .get_children(root_category_id)?
        .into_iter()
        .filter(|c| c.is_active)
        .collect())
}
