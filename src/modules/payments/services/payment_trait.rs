// Payment method contract.
//
// `process` runs synchronously; gateway-backed implementations block on
// their own I/O and surface failures through the normal error type. The
// ledger stores at most one selected payment method and never inspects the
// concrete type.

use crate::core::Result;
use crate::modules::orders::models::Order;

/// Outcome of starting payment for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Customer must be redirected to an external payment page
    Redirect { url: String },

    /// Payment is settled (or will settle offline); no redirect needed
    Confirmed { reference: Option<String> },
}

/// A pluggable payment method.
pub trait PaymentMethod: std::fmt::Debug + Send + Sync {
    /// Stable identifier, persisted with the order
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    fn is_enabled(&self) -> bool;

    /// Start payment processing for the order.
    fn process(&self, order: &Order) -> Result<PaymentOutcome>;
}
