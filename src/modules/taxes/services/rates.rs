// Per-class tax rate table.
//
// The ledger itself never computes tax from rates; callers at the cart
// mutation boundary do, and hand the ledger pre-scaled amounts (per-item
// totals and class-keyed deltas).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Result, StoreError};
use crate::modules::taxes::models::TaxMap;

/// Tax rates keyed by tax class, expressed as fractions (0.23 = 23%).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxRates {
    rates: BTreeMap<String, Decimal>,
}

impl TaxRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rates<I, S>(rates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (class, rate) in rates {
            table.set_rate(class, rate)?;
        }
        Ok(table)
    }

    pub fn set_rate(&mut self, class: impl Into<String>, rate: Decimal) -> Result<()> {
        if rate < Decimal::ZERO {
            return Err(StoreError::validation("Tax rate cannot be negative"));
        }
        if rate > Decimal::ONE {
            return Err(StoreError::validation("Tax rate cannot exceed 1.0 (100%)"));
        }
        self.rates.insert(class.into(), rate);
        Ok(())
    }

    pub fn rate(&self, class: &str) -> Decimal {
        self.rates.get(class).copied().unwrap_or(Decimal::ZERO)
    }

    /// Total tax on an amount that falls under all of the given classes.
    pub fn tax_for(&self, classes: &[String], amount: Decimal) -> Decimal {
        classes
            .iter()
            .map(|class| amount * self.rate(class))
            .sum()
    }

    /// Class-keyed tax breakdown for an amount under the given classes.
    /// The result is a delta suitable for `Order::update_taxes`.
    pub fn class_delta(&self, classes: &[String], amount: Decimal) -> TaxMap {
        TaxMap::from_amounts(
            classes
                .iter()
                .map(|class| (class.clone(), amount * self.rate(class))),
        )
    }
}
