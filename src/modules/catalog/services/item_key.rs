// Line item identity derivation.
//
// The key must be deterministic over product + selected options so that
// adding the same product with the same options lands on the same cart row,
// while different option sets (e.g. variations) produce distinct rows.

use sha2::{Digest, Sha256};

use crate::modules::orders::models::OrderItem;

/// Contract for deriving a line item's identity key.
pub trait ItemKeyGenerator: Send + Sync {
    fn generate_key(&self, item: &OrderItem) -> String;
}

/// Default derivation: SHA-256 over the product id and the item's metadata
/// pairs in key order, hex encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultItemKeyGenerator;

impl ItemKeyGenerator for DefaultItemKeyGenerator {
    fn generate_key(&self, item: &OrderItem) -> String {
        let mut hasher = Sha256::new();
        hasher.update(item.product_id.as_bytes());
        for (key, value) in &item.meta {
            hasher.update(b"|");
            hasher.update(key.as_bytes());
            hasher.update(b"=");
            hasher.update(value.as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}
