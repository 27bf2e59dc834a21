// Catalog module

pub mod models;
pub mod services;

pub use models::Product;
pub use services::{DefaultItemKeyGenerator, ItemKeyGenerator, ProductCatalog, StaticCatalog};
