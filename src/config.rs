use serde::{Deserialize, Serialize};

/// Store-wide options the ledger depends on.
///
/// The recognized tax-class list is fixed for the lifetime of an order: every
/// tax map the order maintains carries exactly one entry per class listed
/// here. The struct is deserializable so the enclosing application can load
/// it from whatever settings store it uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Ordered list of recognized tax classes, e.g. ["standard", "reduced"]
    pub tax_classes: Vec<String>,

    /// Whether displayed prices already include tax
    #[serde(default)]
    pub prices_include_tax: bool,

    /// Whether cart mutations should check product stock
    #[serde(default = "default_validate_stock")]
    pub validate_stock: bool,
}

fn default_validate_stock() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            tax_classes: vec!["standard".to_string()],
            prices_include_tax: false,
            validate_stock: true,
        }
    }
}

impl StoreConfig {
    pub fn with_tax_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tax_classes: classes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}
