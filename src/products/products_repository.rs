use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::warn;

use crate::constants::PRODUCTS_STORAGE_KEY;
use crate::errors::Result;
use crate::products::products_model::Product;
use crate::products::products_traits::ProductRepositoryTrait;
use crate::storage::BackingStore;

pub struct ProductRepository {
    store: Arc<dyn BackingStore>,
    products: RwLock<Vec<Product>>,
    loaded: AtomicBool,
}

impl ProductRepository {
    pub fn new(store: Arc<dyn BackingStore>) -> Self {
        ProductRepository {
            store,
            products: RwLock::new(Vec::new()),
            loaded: AtomicBool::new(false),
        }
    }

    fn persist(&self, products: &[Product]) -> Result<()> {
        let payload = serde_json::to_string(products)?;
        self.store.set(PRODUCTS_STORAGE_KEY, &payload)
    }

    fn next_id(products: &[Product]) -> i64 {
        products.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }
}

impl ProductRepositoryTrait for ProductRepository {
    fn initialize(&self) -> Result<()> {
        if self.loaded.load(Ordering::Acquire) {
            return Ok(());
        }

        let loaded = match self.store.get(PRODUCTS_STORAGE_KEY) {
            Some(payload) => match serde_json::from_str::<Vec<Product>>(&payload) {
                Ok(products) => products,
                Err(e) => {
                    warn!("Stored product collection is corrupt, starting empty: {}", e);
                    let empty: Vec<Product> = Vec::new();
                    self.persist(&empty)?;
                    empty
                }
            },
            None => {
                let empty: Vec<Product> = Vec::new();
                self.persist(&empty)?;
                empty
            }
        };

        *self.products.write().unwrap() = loaded;
        self.loaded.store(true, Ordering::Release);
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().unwrap().clone())
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Product>> {
        Ok(self
            .products
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    fn insert(&self, mut product: Product) -> Result<Product> {
        let mut products = self.products.write().unwrap();
        product.id = Self::next_id(&products);
        products.push(product.clone());
        self.persist(&products)?;
        Ok(product)
    }

    fn replace(&self, product: Product) -> Result<Option<Product>> {
        let mut products = self.products.write().unwrap();
        let Some(position) = products.iter().position(|p| p.id == product.id) else {
            return Ok(None);
        };
        products[position] = product.clone();
        self.persist(&products)?;
        Ok(Some(product))
    }

    fn delete(&self, id: i64) -> Result<usize> {
        self.bulk_delete(&[id])
    }

    fn bulk_delete(&self, ids: &[i64]) -> Result<usize> {
        let mut products = self.products.write().unwrap();
        let before = products.len();
        products.retain(|p| !ids.contains(&p.id));
        let removed = before - products.len();
        if removed > 0 {
            self.persist(&products)?;
        }
        Ok(removed)
    }
}
