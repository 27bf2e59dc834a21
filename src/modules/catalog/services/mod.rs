mod catalog_trait;
mod item_key;

pub use catalog_trait::{ProductCatalog, StaticCatalog};
pub use item_key::{DefaultItemKeyGenerator, ItemKeyGenerator};
