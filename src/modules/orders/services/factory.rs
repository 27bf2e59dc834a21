// Order construction from persisted state and from carts.

use tracing::debug;

use crate::config::StoreConfig;
use crate::core::Result;
use crate::modules::checkout::models::CheckoutRequest;
use crate::modules::orders::hooks::OrderHooks;
use crate::modules::orders::models::{Cart, Order, OrderState, OrderStatus};
use crate::modules::payments::services::PaymentMethodRegistry;
use crate::modules::shipping::services::ShippingMethodRegistry;

/// Builds orders, resolving persisted strategy references against the
/// configured registries.
pub struct OrderFactory<'a> {
    config: &'a StoreConfig,
    shipping_methods: &'a dyn ShippingMethodRegistry,
    payment_methods: &'a dyn PaymentMethodRegistry,
}

impl<'a> OrderFactory<'a> {
    pub fn new(
        config: &'a StoreConfig,
        shipping_methods: &'a dyn ShippingMethodRegistry,
        payment_methods: &'a dyn PaymentMethodRegistry,
    ) -> Self {
        Self {
            config,
            shipping_methods,
            payment_methods,
        }
    }

    /// Reconstruct an order from persisted state. When the state carries
    /// items the ledger is cleared first so restore does not stack them on
    /// top of existing contents; itemless state layers over the fresh
    /// ledger as-is. The `order_fetched` filter runs on the result.
    pub fn restore(&self, state: OrderState, hooks: OrderHooks) -> Result<Order> {
        let mut order = Order::with_hooks(self.config, hooks);

        if state.items.is_some() {
            order.remove_items();
        }

        let filters = order.hooks.order_fetched.clone();
        order.restore_state(state.clone(), self.shipping_methods, self.payment_methods)?;

        Ok(filters.apply(order, &state))
    }

    /// Convert a cart into a pending order at checkout. The cart's
    /// accounting carries over untouched; the request contributes the
    /// customer note, and a fresh id plus security key are issued.
    pub fn from_cart(&self, cart: Cart, request: &CheckoutRequest) -> Order {
        let mut order = cart;
        order.id = uuid::Uuid::new_v4().to_string();
        order.key = Some(uuid::Uuid::new_v4().simple().to_string());
        order.created_at = chrono::Utc::now();
        order.updated_at = order.created_at;
        order.status = OrderStatus::Pending;
        order.status_history.clear();

        if let Some(note) = &request.customer_note {
            order.customer_note = note.clone();
        }

        debug!(order = %order.id, total = %order.total, "order created from cart");
        order
    }
}
