// A line item: one purchased product line.
//
// `tax` is the total tax for the line at its current quantity, not a
// per-unit figure. `Order::add_item` trusts it as-is, so anything that
// changes the quantity must rescale the tax before the item re-enters an
// order.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Result, StoreError};
use crate::modules::catalog::models::Product;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Identity within one order, derived from product + metadata
    pub key: String,

    /// Product reference; resolution happens at the catalog
    pub product_id: String,

    /// Display name as sold (products may be renamed later)
    pub name: String,

    /// Units purchased, always positive inside an order
    pub quantity: u32,

    /// Price per unit
    pub unit_price: Decimal,

    /// Total tax for this line at the current quantity
    pub tax: Decimal,

    /// Tax classes the product falls under
    pub tax_classes: Vec<String>,

    /// Selected options (variation choices etc.), part of the identity key
    pub meta: BTreeMap<String, String>,

    /// Whether this line needs to be shipped
    pub requires_shipping: bool,
}

impl OrderItem {
    /// Build a line from a product. `tax` is the already-quantity-scaled tax
    /// total, computed by the caller from its rate rules.
    pub fn new(product: &Product, quantity: u32, tax: Decimal) -> Self {
        Self {
            key: String::new(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
            unit_price: product.price,
            tax,
            tax_classes: product.tax_classes.clone(),
            meta: BTreeMap::new(),
            requires_shipping: product.requires_shipping,
        }
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.meta.insert(key.into(), value.into());
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    /// Line cost: unit price times quantity. Tax is not included.
    pub fn cost(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Tax per single unit at the current quantity.
    pub fn unit_tax(&self) -> Decimal {
        if self.quantity == 0 {
            return Decimal::ZERO;
        }
        self.tax / Decimal::from(self.quantity)
    }

    /// Change the quantity, rescaling the stored tax so it stays a correct
    /// quantity-scaled total. Zero is rejected; removal at zero is the
    /// order's job, not the item's.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity(0));
        }

        let unit_tax = self.unit_tax();
        self.quantity = quantity;
        self.tax = unit_tax * Decimal::from(quantity);
        Ok(())
    }
}
