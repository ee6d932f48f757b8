use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use log::warn;

use crate::categories::categories_constants::default_categories;
use crate::categories::categories_model::{Category, CategoryUpdate, NewCategory};
use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::constants::CATEGORIES_STORAGE_KEY;
use crate::errors::{Result, ValidationError};
use crate::storage::BackingStore;

pub struct CategoryRepository {
    store: Arc<dyn BackingStore>,
    categories: RwLock<Vec<Category>>,
    loaded: AtomicBool,
}

impl CategoryRepository {
    pub fn new(store: Arc<dyn BackingStore>) -> Self {
        CategoryRepository {
            store,
            categories: RwLock::new(Vec::new()),
            loaded: AtomicBool::new(false),
        }
    }

    /// Serialize the whole collection to the backing store. Callers hold the
    /// write lock, so the persisted blob always matches the in-memory state.
    fn persist(&self, categories: &[Category]) -> Result<()> {
        let payload = serde_json::to_string(categories)?;
        self.store.set(CATEGORIES_STORAGE_KEY, &payload)
    }

    fn next_id(categories: &[Category]) -> i64 {
        categories.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }

    /// Walks the parent chain from `start` looking for `needle`. Used to
    /// reject reparenting that would close a cycle.
    fn chain_contains(categories: &[Category], start: i64, needle: i64) -> bool {
        let mut current = Some(start);
        let mut hops = 0;
        while let Some(id) = current {
            if id == needle {
                return true;
            }
            // A malformed chain longer than the collection means a
            // pre-existing cycle; stop rather than loop forever.
            hops += 1;
            if hops > categories.len() {
                return true;
            }
            current = categories
                .iter()
                .find(|c| c.id == id)
                .and_then(|c| c.parent_id);
        }
        false
    }
}

impl CategoryRepositoryTrait for CategoryRepository {
    fn initialize(&self) -> Result<()> {
        if self.loaded.load(Ordering::Acquire) {
            return Ok(());
        }

        let loaded = match self.store.get(CATEGORIES_STORAGE_KEY) {
            Some(payload) => match serde_json::from_str::<Vec<Category>>(&payload) {
                Ok(categories) => categories,
                Err(e) => {
                    warn!("Stored category collection is corrupt, reseeding: {}", e);
                    let seed = default_categories();
                    self.persist(&seed)?;
                    seed
                }
            },
            None => {
                let seed = default_categories();
                self.persist(&seed)?;
                seed
            }
        };

        *self.categories.write().unwrap() = loaded;
        self.loaded.store(true, Ordering::Release);
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Category>> {
        Ok(self.categories.read().unwrap().clone())
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        Ok(self
            .categories
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    fn get_roots(&self) -> Result<Vec<Category>> {
        let mut roots: Vec<Category> = self
            .categories
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.parent_id.is_none())
            .cloned()
            .collect();
        roots.sort_by_key(|c| c.order);
        Ok(roots)
    }

    fn get_children(&self, parent_id: i64) -> Result<Vec<Category>> {
        let mut children: Vec<Category> = self
            .categories
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.parent_id == Some(parent_id))
            .cloned()
            .collect();
        children.sort_by_key(|c| c.order);
        Ok(children)
    }

    fn create(&self, new_category: NewCategory) -> Result<Category> {
        if new_category.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }

        let mut categories = self.categories.write().unwrap();

        if let Some(parent_id) = new_category.parent_id {
            if !categories.iter().any(|c| c.id == parent_id) {
                return Err(ValidationError::InvalidInput(format!(
                    "Parent category {} does not exist",
                    parent_id
                ))
                .into());
            }
        }

        // Display rank among siblings: existing siblings + 1.
        let sibling_count = categories
            .iter()
            .filter(|c| c.parent_id == new_category.parent_id)
            .count();

        let now = Utc::now().to_rfc3339();
        let category = Category {
            id: Self::next_id(&categories),
            name: new_category.name,
            description: new_category.description,
            image: new_category.image,
            parent_id: new_category.parent_id,
            is_active: true,
            order: sibling_count as i32 + 1,
            created_at: now.clone(),
            updated_at: now,
        };

        categories.push(category.clone());
        self.persist(&categories)?;
        Ok(category)
    }

    fn update(&self, id: i64, update: CategoryUpdate) -> Result<Option<Category>> {
        let mut categories = self.categories.write().unwrap();

        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(ValidationError::MissingField("name".to_string()).into());
            }
        }
        if let Some(parent_id) = update.parent_id {
            if !categories.iter().any(|c| c.id == parent_id) {
                return Err(ValidationError::InvalidInput(format!(
                    "Parent category {} does not exist",
                    parent_id
                ))
                .into());
            }
            if Self::chain_contains(&categories, parent_id, id) {
                return Err(ValidationError::InvalidInput(format!(
                    "Reparenting category {} under {} would create a cycle",
                    id, parent_id
                ))
                .into());
            }
        }

        let Some(position) = categories.iter().position(|c| c.id == id) else {
            // Missing id is a caller error we absorb; existence checks
            // happened at the UI boundary.
            return Ok(None);
        };

        {
            let category = &mut categories[position];
            if let Some(name) = update.name {
                category.name = name;
            }
            if let Some(description) = update.description {
                category.description = Some(description);
            }
            if let Some(image) = update.image {
                category.image = Some(image);
            }
            if let Some(parent_id) = update.parent_id {
                category.parent_id = Some(parent_id);
            }
            if let Some(order) = update.order {
                category.order = order;
            }
            if let Some(is_active) = update.is_active {
                category.is_active = is_active;
            }
            category.updated_at = Utc::now().to_rfc3339();
        }

        let updated = categories[position].clone();
        self.persist(&categories)?;
        Ok(Some(updated))
    }

    fn delete(&self, id: i64) -> Result<usize> {
        let mut categories = self.categories.write().unwrap();
        let before = categories.len();
        // One cascading level: the category and its direct children. The
        // tree in use is two tiers deep, so grandchildren do not occur;
        // if deeper nodes exist they are left in place (see DESIGN.md).
        categories.retain(|c| c.id != id && c.parent_id != Some(id));
        let removed = before - categories.len();
        if removed > 0 {
            self.persist(&categories)?;
        }
        Ok(removed)
    }

    fn toggle_status(&self, id: i64) -> Result<Option<Category>> {
        let mut categories = self.categories.write().unwrap();
        let Some(category) = categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        category.is_active = !category.is_active;
        category.updated_at = Utc::now().to_rfc3339();
        let updated = category.clone();
        self.persist(&categories)?;
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn repo() -> CategoryRepository {
        let repo = CategoryRepository::new(Arc::new(MemoryStore::new()));
        // Start from an empty, persisted collection so tests control ids.
        repo.store.set(CATEGORIES_STORAGE_KEY, "[]").unwrap();
        repo.initialize().unwrap();
        repo
    }

    fn new_category(name: &str, parent_id: Option<i64>) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            parent_id,
            ..Default::default()
        }
    }

    #[test]
    fn initialize_seeds_default_set_once() {
        let store = Arc::new(MemoryStore::new());
        let repo = CategoryRepository::new(store.clone());
        repo.initialize().unwrap();

        let seeded = repo.get_all().unwrap();
        assert!(!seeded.is_empty());
        assert!(store.get(CATEGORIES_STORAGE_KEY).is_some());

        // Mutate, then re-initialize: the loaded collection must survive.
        repo.create(new_category("Footwear", None)).unwrap();
        let count = repo.get_all().unwrap().len();
        repo.initialize().unwrap();
        assert_eq!(repo.get_all().unwrap().len(), count);
    }

    #[test]
    fn initialize_recovers_from_corrupt_payload() {
        let store = Arc::new(MemoryStore::new().with_entry(CATEGORIES_STORAGE_KEY, "not json {"));
        let repo = CategoryRepository::new(store.clone());
        repo.initialize().unwrap();

        assert_eq!(repo.get_all().unwrap().len(), default_categories().len());

        // The corrupt blob was replaced with the reseeded collection.
        let payload = store.get(CATEGORIES_STORAGE_KEY).unwrap();
        assert!(serde_json::from_str::<Vec<Category>>(&payload).is_ok());
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let repo = repo();
        let a = repo.create(new_category("Men", None)).unwrap();
        let b = repo.create(new_category("Women", None)).unwrap();
        let c = repo.create(new_category("Kids", None)).unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));

        // Deleting from the middle leaves a gap that is never refilled.
        repo.delete(b.id).unwrap();
        let d = repo.create(new_category("Accessories", None)).unwrap();
        assert_eq!(d.id, 4);
    }

    #[test]
    fn create_defaults_active_and_sibling_order() {
        let repo = repo();
        let men = repo.create(new_category("Men", None)).unwrap();
        let women = repo.create(new_category("Women", None)).unwrap();
        let tees = repo.create(new_category("T-Shirts", Some(men.id))).unwrap();

        assert!(men.is_active && women.is_active && tees.is_active);
        assert_eq!(men.order, 1);
        assert_eq!(women.order, 2);
        assert_eq!(tees.order, 1);
    }

    #[test]
    fn create_rejects_blank_name_and_dangling_parent() {
        let repo = repo();
        assert!(repo.create(new_category("  ", None)).is_err());
        assert!(repo.create(new_category("Shoes", Some(99))).is_err());
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn delete_cascades_one_level_only() {
        let repo = repo();
        let men = repo.create(new_category("Men", None)).unwrap();
        let tees = repo.create(new_category("T-Shirts", Some(men.id))).unwrap();
        let jeans = repo.create(new_category("Jeans", Some(men.id))).unwrap();
        let graphic = repo
            .create(new_category("Graphic Tees", Some(tees.id)))
            .unwrap();
        let women = repo.create(new_category("Women", None)).unwrap();

        let removed = repo.delete(men.id).unwrap();
        assert_eq!(removed, 3);
        assert!(repo.get_by_id(men.id).unwrap().is_none());
        assert!(repo.get_by_id(tees.id).unwrap().is_none());
        assert!(repo.get_by_id(jeans.id).unwrap().is_none());
        // Grandchild survives with a dangling parent, matching the
        // two-tier cascade contract.
        assert!(repo.get_by_id(graphic.id).unwrap().is_some());
        assert!(repo.get_by_id(women.id).unwrap().is_some());
    }

    #[test]
    fn update_merges_and_ignores_missing_id() {
        let repo = repo();
        let men = repo.create(new_category("Men", None)).unwrap();

        let updated = repo
            .update(
                men.id,
                CategoryUpdate {
                    description: Some("Menswear".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Men");
        assert_eq!(updated.description.as_deref(), Some("Menswear"));

        assert!(repo.update(404, CategoryUpdate::default()).unwrap().is_none());
    }

    #[test]
    fn update_rejects_cycles() {
        let repo = repo();
        let men = repo.create(new_category("Men", None)).unwrap();
        let tees = repo.create(new_category("T-Shirts", Some(men.id))).unwrap();

        let result = repo.update(
            men.id,
            CategoryUpdate {
                parent_id: Some(tees.id),
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn toggle_status_flips_and_persists() {
        let store = Arc::new(MemoryStore::new().with_entry(CATEGORIES_STORAGE_KEY, "[]"));
        let repo = CategoryRepository::new(store.clone());
        repo.initialize().unwrap();

        let men = repo.create(new_category("Men", None)).unwrap();
        let toggled = repo.toggle_status(men.id).unwrap().unwrap();
        assert!(!toggled.is_active);

        let payload = store.get(CATEGORIES_STORAGE_KEY).unwrap();
        let persisted: Vec<Category> = serde_json::from_str(&payload).unwrap();
        assert!(!persisted[0].is_active);
    }
}
