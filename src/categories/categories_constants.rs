use chrono::Utc;

use crate::categories::categories_model::Category;

/// Root names and their subcategories seeded into an empty store on first
/// `initialize()`.
const DEFAULT_TREE: &[(&str, &[&str])] = &[
    ("Men", &["T-Shirts", "Shirts", "Jeans", "Shoes"]),
    ("Women", &["Dresses", "Tops", "Sarees", "Heels"]),
    ("Kids", &["Boys", "Girls"]),
    ("Accessories", &[]),
];

/// Build the default category seed set: roots first, then children, ids
/// assigned sequentially so the monotonic-id rule holds from the start.
pub fn default_categories() -> Vec<Category> {
    let now = Utc::now().to_rfc3339();
    let mut categories = Vec::new();
    let mut next_id: i64 = 1;

    for (root_order, (root_name, _)) in DEFAULT_TREE.iter().enumerate() {
        categories.push(Category {
            id: next_id,
            name: (*root_name).to_string(),
            description: None,
            image: None,
            parent_id: None,
            is_active: true,
            order: root_order as i32 + 1,
            created_at: now.clone(),
            updated_at: now.clone(),
        });
        next_id += 1;
    }

    for (root_order, (_, children)) in DEFAULT_TREE.iter().enumerate() {
        let parent_id = root_order as i64 + 1;
        for (child_order, child_name) in children.iter().enumerate() {
            categories.push(Category {
                id: next_id,
                name: (*child_name).to_string(),
                description: None,
                image: None,
                parent_id: Some(parent_id),
                is_active: true,
                order: child_order as i32 + 1,
                created_at: now.clone(),
                updated_at: now.clone(),
            });
            next_id += 1;
        }
    }

    categories
}
