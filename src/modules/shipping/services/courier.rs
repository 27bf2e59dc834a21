// Courier shipping with customer-selectable service tiers. The chosen rate
// lives on the order, not on the method, so one shared method instance can
// serve concurrent carts.

use rust_decimal::Decimal;

use crate::core::{Result, StoreError};
use crate::modules::orders::models::Order;
use crate::modules::shipping::models::Rate;
use crate::modules::shipping::services::{MultiRateShipping, ShippingMethod};

#[derive(Debug)]
pub struct CourierShipping {
    enabled: bool,
    tiers: Vec<Rate>,
}

impl CourierShipping {
    pub fn new(tiers: Vec<Rate>) -> Self {
        Self {
            enabled: true,
            tiers,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl ShippingMethod for CourierShipping {
    fn id(&self) -> &str {
        "courier"
    }

    fn name(&self) -> &str {
        "Courier"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn calculate(&self, _order: &Order) -> Result<Decimal> {
        Err(StoreError::shipping(
            "courier shipping requires a service tier",
        ))
    }

    fn as_multi_rate(&self) -> Option<&dyn MultiRateShipping> {
        Some(self)
    }
}

impl MultiRateShipping for CourierShipping {
    fn rates(&self, order: &Order) -> Vec<Rate> {
        if order.is_shipping_required() {
            self.tiers.clone()
        } else {
            Vec::new()
        }
    }

    fn calculate_rate(&self, _order: &Order, rate_id: &str) -> Result<Decimal> {
        self.tiers
            .iter()
            .find(|tier| tier.id == rate_id)
            .map(|tier| tier.price)
            .ok_or_else(|| StoreError::shipping(format!("unknown service tier '{rate_id}'")))
    }
}
