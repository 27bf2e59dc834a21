use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Result, StoreError};

/// A product as the cart sees it: identity, price, tax classification and
/// whatever the catalog knows about stock. Catalog persistence and lookup
/// live outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,

    /// Display name carried onto line items
    pub name: String,

    /// Price per unit
    pub price: Decimal,

    /// Tax classes this product falls under
    pub tax_classes: Vec<String>,

    /// Units in stock; `None` means stock is not tracked
    pub stock: Option<u32>,

    /// Whether the product needs to be shipped
    #[serde(default = "default_requires_shipping")]
    pub requires_shipping: bool,
}

fn default_requires_shipping() -> bool {
    true
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            tax_classes: Vec::new(),
            stock: None,
            requires_shipping: true,
        }
    }

    pub fn with_tax_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tax_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn without_shipping(mut self) -> Self {
        self.requires_shipping = false;
        self
    }

    /// Fails with the available quantity when fewer than `quantity` units
    /// remain. Products without stock tracking always pass.
    pub fn ensure_stock(&self, quantity: u32) -> Result<()> {
        match self.stock {
            Some(available) if available < quantity => {
                Err(StoreError::insufficient_stock(available))
            }
            _ => Ok(()),
        }
    }
}
