use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use super::query::{name_matches, CatalogStats, ListQuery, Page, SearchResult};
use super::{ProductRepository, StoreError};
use crate::models::{NewProduct, Product, ProductChanges};

/// Product collection held in process memory, in insertion order.
///
/// Queries take the read lock and mutations the write lock for the whole
/// operation, so each call is atomic with respect to every other call.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the two demo products.
    pub fn with_demo_products() -> Self {
        let products = demo_products()
            .into_iter()
            .map(|new| Product::from_new(new_id(), new))
            .collect();
        Self {
            products: RwLock::new(products),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Product>>, StoreError> {
        self.products.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Product>>, StoreError> {
        self.products.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl ProductRepository for InMemoryProductStore {
    fn list(&self, query: &ListQuery) -> Result<Page, StoreError> {
        let products = self.read()?;
        let filtered: Vec<Product> = match query.category() {
            Some(category) => products
                .iter()
                .filter(|p| p.category == category)
                .cloned()
                .collect(),
            None => products.clone(),
        };
        Ok(Page::slice(filtered, query.page(), query.limit()))
    }

    fn search(&self, term: &str) -> Result<SearchResult, StoreError> {
        let needle = term.to_lowercase();
        let products = self.read()?;
        let data: Vec<Product> = products
            .iter()
            .filter(|p| name_matches(p, &needle))
            .cloned()
            .collect();
        Ok(SearchResult {
            total: data.len(),
            data,
        })
    }

    fn stats(&self) -> Result<CatalogStats, StoreError> {
        let products = self.read()?;
        Ok(CatalogStats::from_products(products.iter()))
    }

    fn get(&self, id: &str) -> Result<Product, StoreError> {
        self.read()?
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn create(&self, new: NewProduct) -> Result<Product, StoreError> {
        let mut products = self.write()?;
        let mut id = new_id();
        while products.iter().any(|p| p.id == id) {
            id = new_id();
        }
        let product = Product::from_new(id, new);
        products.push(product.clone());
        tracing::info!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    fn update(&self, id: &str, changes: ProductChanges) -> Result<Product, StoreError> {
        let mut products = self.write()?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        product.apply(changes);
        tracing::info!(id = %product.id, "Product updated");
        Ok(product.clone())
    }

    fn delete(&self, id: &str) -> Result<Product, StoreError> {
        let mut products = self.write()?;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = products.remove(index);
        tracing::info!(id = %removed.id, "Product deleted");
        Ok(removed)
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn demo_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Widget A".to_string(),
            description: "A useful widget".to_string(),
            price: 9.99,
            category: "tools".to_string(),
            in_stock: true,
        },
        NewProduct {
            name: "Gadget B".to_string(),
            description: "A fancy gadget".to_string(),
            price: 19.99,
            category: "electronics".to_string(),
            in_stock: false,
        },
    ]
}
