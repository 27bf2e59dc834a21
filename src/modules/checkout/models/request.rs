use serde::{Deserialize, Serialize};

/// Everything the customer submits on the checkout page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<String>,

    /// Service tier, for methods that offer more than one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_rate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    #[serde(default)]
    pub terms_accepted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coupon_codes: Vec<String>,
}
