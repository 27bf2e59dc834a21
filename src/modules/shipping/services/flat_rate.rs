// Flat-rate shipping: one configured price per order, taxed per class at
// configured fractional rates against that price.

use rust_decimal::Decimal;

use crate::core::Result;
use crate::modules::orders::models::Order;
use crate::modules::shipping::services::ShippingMethod;
use crate::modules::taxes::models::TaxMap;
use crate::modules::taxes::services::TaxRates;

#[derive(Debug)]
pub struct FlatRateShipping {
    enabled: bool,
    price: Decimal,
    tax_rates: TaxRates,
}

impl FlatRateShipping {
    pub fn new(price: Decimal) -> Self {
        Self {
            enabled: true,
            price,
            tax_rates: TaxRates::default(),
        }
    }

    pub fn with_tax_rates(mut self, tax_rates: TaxRates) -> Self {
        self.tax_rates = tax_rates;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl ShippingMethod for FlatRateShipping {
    fn id(&self) -> &str {
        "flat-rate"
    }

    fn name(&self) -> &str {
        "Flat rate"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn calculate(&self, order: &Order) -> Result<Decimal> {
        if order.is_shipping_required() {
            Ok(self.price)
        } else {
            Ok(Decimal::ZERO)
        }
    }

    fn shipping_tax(&self, order: &Order) -> TaxMap {
        if !order.is_shipping_required() {
            return TaxMap::zeroed(order.tax().classes());
        }
        let classes: Vec<String> = order.tax().classes().map(String::from).collect();
        self.tax_rates.class_delta(&classes, self.price)
    }
}
