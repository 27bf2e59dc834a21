use std::collections::HashMap;

use crate::modules::catalog::models::Product;

/// Product lookup contract. The real catalog (database, search index, remote
/// service) lives outside this crate; the checkout boundary only needs to
/// resolve references.
pub trait ProductCatalog: Send + Sync {
    fn find_product(&self, id: &str) -> Option<Product>;
}

/// In-memory catalog backed by a map. Enough for tests and for embedders
/// that preload their product set.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    products: HashMap<String, Product>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }
}

impl ProductCatalog for StaticCatalog {
    fn find_product(&self, id: &str) -> Option<Product> {
        self.products.get(id).cloned()
    }
}
