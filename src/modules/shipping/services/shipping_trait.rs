// Shipping method contract.
//
// The ledger invokes methods synchronously and never branches on concrete
// types: the only capability check it performs is `as_multi_rate`. A
// `calculate` implementation may perform external I/O (carrier rate
// lookups); its failures propagate to the caller untouched, and any retry
// policy belongs to the implementation.

use rust_decimal::Decimal;

use crate::core::Result;
use crate::modules::orders::models::Order;
use crate::modules::shipping::models::Rate;
use crate::modules::taxes::models::TaxMap;

/// A pluggable shipping method.
pub trait ShippingMethod: std::fmt::Debug + Send + Sync {
    /// Stable identifier, also used for selection equality
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    fn is_enabled(&self) -> bool;

    /// Price of shipping the given order with this method.
    fn calculate(&self, order: &Order) -> Result<Decimal>;

    /// Per-class tax contribution for shipping this order. Jurisdictions
    /// differ on whether shipping is taxed, so the default is tax-free and
    /// the order additionally threads the result through its shipping-tax
    /// filter chain.
    fn shipping_tax(&self, order: &Order) -> TaxMap {
        TaxMap::zeroed(order.tax().classes())
    }

    /// Opaque persistable representation, restored through
    /// `ShippingMethodRegistry::find_for_state`.
    fn state(&self) -> serde_json::Value {
        serde_json::json!({ "id": self.id() })
    }

    /// Multi-rate capability, when present.
    fn as_multi_rate(&self) -> Option<&dyn MultiRateShipping> {
        None
    }
}

/// Capability for methods offering several rate variants. Selecting such a
/// method without naming a rate is an `InvalidShippingSelection`.
pub trait MultiRateShipping: ShippingMethod {
    /// Rates available for the given order
    fn rates(&self, order: &Order) -> Vec<Rate>;

    /// Price for one specific rate; fails when the rate is unknown.
    fn calculate_rate(&self, order: &Order, rate_id: &str) -> Result<Decimal>;
}
