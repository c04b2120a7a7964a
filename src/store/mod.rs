pub mod memory;
pub mod query;

pub use memory::InMemoryProductStore;
pub use query::{first_value, CatalogStats, ListQuery, Page, SearchResult};

use crate::models::{NewProduct, Product, ProductChanges};

/// Errors raised by product storage
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Product store lock poisoned")]
    LockPoisoned,
}

/// Storage seam for the product collection. Each call is one atomic step:
/// implementations must not let two calls interleave their read-modify-write.
pub trait ProductRepository: Send + Sync {
    fn list(&self, query: &ListQuery) -> Result<Page, StoreError>;

    fn search(&self, term: &str) -> Result<SearchResult, StoreError>;

    fn stats(&self) -> Result<CatalogStats, StoreError>;

    fn get(&self, id: &str) -> Result<Product, StoreError>;

    fn create(&self, new: NewProduct) -> Result<Product, StoreError>;

    fn update(&self, id: &str, changes: ProductChanges) -> Result<Product, StoreError>;

    fn delete(&self, id: &str) -> Result<Product, StoreError>;

    fn count(&self) -> Result<usize, StoreError>;
}
