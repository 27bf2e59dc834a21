// Tax amounts keyed by tax class.
//
// An order is constructed with a fixed set of recognized tax classes and
// every map it owns keeps exactly one entry (possibly zero) per class.
// Deltas referencing classes outside that set are dropped, never inserted.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-tax-class monetary amounts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxMap {
    amounts: BTreeMap<String, Decimal>,
}

impl TaxMap {
    /// Map holding a zero amount for each given class.
    pub fn zeroed<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            amounts: classes
                .into_iter()
                .map(|class| (class.into(), Decimal::ZERO))
                .collect(),
        }
    }

    /// Map built from explicit class/amount pairs. Used for deltas and
    /// method tax contributions, which may mention any class.
    pub fn from_amounts<I, S>(amounts: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        Self {
            amounts: amounts
                .into_iter()
                .map(|(class, amount)| (class.into(), amount))
                .collect(),
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.amounts.keys().map(String::as_str)
    }

    pub fn contains_class(&self, class: &str) -> bool {
        self.amounts.contains_key(class)
    }

    /// Amount recorded for a class, zero when the class is absent.
    pub fn amount(&self, class: &str) -> Decimal {
        self.amounts.get(class).copied().unwrap_or(Decimal::ZERO)
    }

    /// Set the amount for a class, inserting it if absent.
    pub fn insert(&mut self, class: impl Into<String>, amount: Decimal) {
        self.amounts.insert(class.into(), amount);
    }

    /// Additively merge a delta into this map. Only classes this map already
    /// recognizes are touched; anything else is dropped.
    pub fn add(&mut self, delta: &TaxMap) {
        for (class, amount) in &delta.amounts {
            match self.amounts.get_mut(class) {
                Some(current) => *current += *amount,
                None => debug!(class = %class, "dropping tax delta for unrecognized class"),
            }
        }
    }

    /// Absolute replace: every recognized class takes the incoming amount,
    /// falling back to zero when the incoming map does not mention it.
    pub fn replace(&mut self, incoming: &TaxMap) {
        for (class, amount) in self.amounts.iter_mut() {
            *amount = incoming.amount(class);
        }
        for class in incoming.amounts.keys() {
            if !self.amounts.contains_key(class) {
                debug!(class = %class, "dropping tax amount for unrecognized class");
            }
        }
    }

    /// Union merge: classes present in either map appear in the result with
    /// their amounts summed. This is the "combined tax" shape.
    pub fn merged(&self, other: &TaxMap) -> TaxMap {
        let mut combined = self.clone();
        for (class, amount) in &other.amounts {
            *combined
                .amounts
                .entry(class.clone())
                .or_insert(Decimal::ZERO) += *amount;
        }
        combined
    }

    /// Sum over every class.
    pub fn total(&self) -> Decimal {
        self.amounts.values().copied().sum()
    }

    /// Reset every entry to zero, keeping the class set intact.
    pub fn zero_out(&mut self) {
        for amount in self.amounts.values_mut() {
            *amount = Decimal::ZERO;
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amounts.values().all(|amount| amount.is_zero())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.amounts
            .iter()
            .map(|(class, amount)| (class.as_str(), *amount))
    }

    pub fn as_map(&self) -> &BTreeMap<String, Decimal> {
        &self.amounts
    }

    pub fn into_map(self) -> BTreeMap<String, Decimal> {
        self.amounts
    }
}

impl From<BTreeMap<String, Decimal>> for TaxMap {
    fn from(amounts: BTreeMap<String, Decimal>) -> Self {
        Self { amounts }
    }
}
