// Hook points the ledger and its surrounding services expose.
//
// Observers fire before the mutation they announce; filters replace the
// value they are given. Hooks are part of an order's construction so that
// replayed state (restore re-adds items through the normal path) passes
// through the same chains as live mutations.

use crate::core::hooks::{ActionChain, FilterChain};
use crate::modules::checkout::models::CheckoutRequest;
use crate::modules::orders::models::{Order, OrderItem, OrderState};
use crate::modules::taxes::models::TaxMap;

#[derive(Debug, Clone, Default)]
pub struct OrderHooks {
    /// Fired before a line item is inserted
    pub item_added: ActionChain<OrderItem, Order>,

    /// Fired before a line item is removed
    pub item_removed: ActionChain<OrderItem, Order>,

    /// Transforms the shipping tax contribution a method reports
    pub shipping_tax: FilterChain<TaxMap, Order>,

    /// Fired before a cart is converted into an order
    pub before_checkout: ActionChain<CheckoutRequest, Order>,

    /// Transforms an order reconstructed from persisted state
    pub order_fetched: FilterChain<Order, OrderState>,
}

impl OrderHooks {
    pub fn new() -> Self {
        Self::default()
    }
}
