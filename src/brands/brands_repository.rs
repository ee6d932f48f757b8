use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use log::warn;

use crate::brands::brands_model::{Brand, BrandUpdate, NewBrand};
use crate::brands::brands_traits::BrandRepositoryTrait;
use crate::constants::BRANDS_STORAGE_KEY;
use crate::errors::{Result, ValidationError};
use crate::storage::BackingStore;

pub struct BrandRepository {
    store: Arc<dyn BackingStore>,
    brands: RwLock<Vec<Brand>>,
    loaded: AtomicBool,
}

impl BrandRepository {
    pub fn new(store: Arc<dyn BackingStore>) -> Self {
        BrandRepository {
            store,
            brands: RwLock::new(Vec::new()),
            loaded: AtomicBool::new(false),
        }
    }

    fn persist(&self, brands: &[Brand]) -> Result<()> {
        let payload = serde_json::to_string(brands)?;
        self.store.set(BRANDS_STORAGE_KEY, &payload)
    }

    fn next_id(brands: &[Brand]) -> i64 {
        brands.iter().map(|b| b.id).max().unwrap_or(0) + 1
    }
}

impl BrandRepositoryTrait for BrandRepository {
    fn initialize(&self) -> Result<()> {
        if self.loaded.load(Ordering::Acquire) {
            return Ok(());
        }

        let loaded = match self.store.get(BRANDS_STORAGE_KEY) {
            Some(payload) => match serde_json::from_str::<Vec<Brand>>(&payload) {
                Ok(brands) => brands,
                Err(e) => {
                    warn!("Stored brand collection is corrupt, starting empty: {}", e);
                    let empty: Vec<Brand> = Vec::new();
                    self.persist(&empty)?;
                    empty
                }
            },
            None => {
                let empty: Vec<Brand> = Vec::new();
                self.persist(&empty)?;
                empty
            }
        };

        *self.brands.write().unwrap() = loaded;
        self.loaded.store(true, Ordering::Release);
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Brand>> {
        Ok(self.brands.read().unwrap().clone())
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Brand>> {
        Ok(self
            .brands
            .read()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    fn create(&self, new_brand: NewBrand) -> Result<Brand> {
        if new_brand.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }

        let mut brands = self.brands.write().unwrap();
        let now = Utc::now().to_rfc3339();
        let brand = Brand {
            id: Self::next_id(&brands),
            name: new_brand.name,
            description: new_brand.description,
            website: new_brand.website,
            logo: new_brand.logo,
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        };

        brands.push(brand.clone());
        self.persist(&brands)?;
        Ok(brand)
    }

    fn update(&self, id: i64, update: BrandUpdate) -> Result<Option<Brand>> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(ValidationError::MissingField("name".to_string()).into());
            }
        }

        let mut brands = self.brands.write().unwrap();
        let Some(brand) = brands.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            brand.name = name;
        }
        if let Some(description) = update.description {
            brand.description = Some(description);
        }
        if let Some(website) = update.website {
            brand.website = Some(website);
        }
        if let Some(logo) = update.logo {
            brand.logo = Some(logo);
        }
        if let Some(is_active) = update.is_active {
            brand.is_active = is_active;
        }
        brand.updated_at = Utc::now().to_rfc3339();

        let updated = brand.clone();
        self.persist(&brands)?;
        Ok(Some(updated))
    }

    fn delete(&self, id: i64) -> Result<usize> {
        self.bulk_delete(&[id])
    }

    fn bulk_delete(&self, ids: &[i64]) -> Result<usize> {
        let mut brands = self.brands.write().unwrap();
        let before = brands.len();
        brands.retain(|b| !ids.contains(&b.id));
        let removed = before - brands.len();
        if removed > 0 {
            self.persist(&brands)?;
        }
        Ok(removed)
    }

    fn toggle_status(&self, id: i64) -> Result<Option<Brand>> {
        let mut brands = self.brands.write().unwrap();
        let Some(brand) = brands.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        brand.is_active = !brand.is_active;
        brand.updated_at = Utc::now().to_rfc3339();
        let updated = brand.clone();
        self.persist(&brands)?;
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn repo() -> (Arc<MemoryStore>, BrandRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = BrandRepository::new(store.clone());
        repo.initialize().unwrap();
        (store, repo)
    }

    fn new_brand(name: &str) -> NewBrand {
        NewBrand {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn initialize_starts_empty_and_is_idempotent() {
        let (store, repo) = repo();
        assert!(repo.get_all().unwrap().is_empty());
        assert_eq!(store.get(BRANDS_STORAGE_KEY).as_deref(), Some("[]"));

        repo.create(new_brand("Nike")).unwrap();
        repo.initialize().unwrap();
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn ids_are_monotonic() {
        let (_, repo) = repo();
        let a = repo.create(new_brand("Nike")).unwrap();
        let b = repo.create(new_brand("Adidas")).unwrap();
        repo.delete(a.id).unwrap();
        let c = repo.create(new_brand("Puma")).unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
    }

    #[test]
    fn create_requires_name() {
        let (_, repo) = repo();
        assert!(repo.create(new_brand("")).is_err());
    }

    #[test]
    fn bulk_delete_removes_all_matches_with_one_persist() {
        let (store, repo) = repo();
        let a = repo.create(new_brand("Nike")).unwrap();
        let b = repo.create(new_brand("Adidas")).unwrap();
        let c = repo.create(new_brand("Puma")).unwrap();

        let removed = repo.bulk_delete(&[a.id, c.id, 99]).unwrap();
        assert_eq!(removed, 2);

        let persisted: Vec<Brand> =
            serde_json::from_str(&store.get(BRANDS_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].id, b.id);
    }

    #[test]
    fn update_merges_and_toggle_flips() {
        let (_, repo) = repo();
        let brand = repo.create(new_brand("Nike")).unwrap();

        let updated = repo
            .update(
                brand.id,
                BrandUpdate {
                    website: Some("https://nike.com".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Nike");
        assert_eq!(updated.website.as_deref(), Some("https://nike.com"));

        let toggled = repo.toggle_status(brand.id).unwrap().unwrap();
        assert!(!toggled.is_active);
        assert!(repo.update(404, BrandUpdate::default()).unwrap().is_none());
    }
}
