use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One rate variant offered by a multi-rate shipping method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    /// Identifier unique within the owning method
    pub id: String,

    /// Human-readable label ("Express", "Standard"...)
    pub label: String,

    /// Price for this rate
    pub price: Decimal,
}

impl Rate {
    pub fn new(id: impl Into<String>, label: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            price,
        }
    }
}
