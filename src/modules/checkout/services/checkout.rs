// Checkout orchestration over the cart ledger.
//
// The service owns the tax rates and all strategy registries; the ledger
// itself stays strategy-agnostic. Every cart mutation here pairs the item
// change with the matching per-class tax delta so the ledger invariants
// hold after each call.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::core::{Result, StoreError};
use crate::modules::catalog::services::{ItemKeyGenerator, ProductCatalog};
use crate::modules::checkout::models::CheckoutRequest;
use crate::modules::coupons::services::CouponLookup;
use crate::modules::orders::models::{Cart, Order, OrderItem};
use crate::modules::orders::services::OrderFactory;
use crate::modules::payments::services::{PaymentMethodRegistry, PaymentOutcome};
use crate::modules::shipping::services::ShippingMethodRegistry;
use crate::modules::taxes::services::TaxRates;

pub struct CheckoutService {
    config: StoreConfig,
    catalog: Arc<dyn ProductCatalog>,
    shipping_methods: Arc<dyn ShippingMethodRegistry>,
    payment_methods: Arc<dyn PaymentMethodRegistry>,
    coupons: Arc<dyn CouponLookup>,
    key_generator: Arc<dyn ItemKeyGenerator>,
    tax_rates: TaxRates,
}

impl CheckoutService {
    pub fn new(
        config: StoreConfig,
        catalog: Arc<dyn ProductCatalog>,
        shipping_methods: Arc<dyn ShippingMethodRegistry>,
        payment_methods: Arc<dyn PaymentMethodRegistry>,
        coupons: Arc<dyn CouponLookup>,
        key_generator: Arc<dyn ItemKeyGenerator>,
        tax_rates: TaxRates,
    ) -> Self {
        Self {
            config,
            catalog,
            shipping_methods,
            payment_methods,
            coupons,
            key_generator,
            tax_rates,
        }
    }

    pub fn new_cart(&self) -> Cart {
        Cart::new(&self.config)
    }

    /// Add a product to the cart. A product already present under the same
    /// derived key has its quantity increased instead of a second line
    /// appearing. Returns the item key.
    pub fn add_to_cart(
        &self,
        cart: &mut Cart,
        product_id: &str,
        quantity: u32,
        meta: BTreeMap<String, String>,
    ) -> Result<String> {
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity(0));
        }

        let product = self
            .catalog
            .find_product(product_id)
            .ok_or_else(|| StoreError::validation(format!("no such product '{product_id}'")))?;

        let mut item = OrderItem::new(&product, quantity, self.tax_rates.tax_for(
            &product.tax_classes,
            product.price * rust_decimal::Decimal::from(quantity),
        ));
        for (meta_key, meta_value) in meta {
            item.set_meta(meta_key, meta_value);
        }
        let key = self.key_generator.generate_key(&item);
        item.set_key(&key);

        let total_quantity = match cart.items().get(&key) {
            Some(existing) => existing.quantity + quantity,
            None => quantity,
        };

        if self.config.validate_stock {
            product.ensure_stock(total_quantity)?;
        }

        if total_quantity != quantity {
            cart.remove_item(&key);
            item.set_quantity(total_quantity)?;
        }

        let added_cost = product.price * rust_decimal::Decimal::from(quantity);
        let delta = self.tax_rates.class_delta(&product.tax_classes, added_cost);

        cart.add_item(item);
        cart.update_taxes(&delta);

        debug!(product = %product_id, quantity, key = %key, "added to cart");
        Ok(key)
    }

    /// Change an item's quantity, keeping the cart's tax map in step with
    /// the cost change. A non-positive quantity removes the item.
    pub fn update_item_quantity(&self, cart: &mut Cart, key: &str, quantity: i64) -> Result<()> {
        let item = cart
            .items()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::item_not_found(key))?;

        if self.config.validate_stock && quantity > 0 {
            if let Some(product) = self.catalog.find_product(&item.product_id) {
                let requested = u32::try_from(quantity)
                    .map_err(|_| StoreError::InvalidQuantity(quantity))?;
                product.ensure_stock(requested)?;
            }
        }

        let old_cost = item.cost();
        cart.update_quantity(key, quantity)?;
        let new_cost = cart.items().get(key).map(OrderItem::cost).unwrap_or_default();

        let delta = self
            .tax_rates
            .class_delta(&item.tax_classes, new_cost - old_cost);
        cart.update_taxes(&delta);
        Ok(())
    }

    /// Reconcile the cart's coupons and discount against the submitted code
    /// list. Codes not in the list are dropped, the running discount is
    /// rebuilt from scratch, and every failure is collected so the customer
    /// sees all problems at once rather than one per submission.
    pub fn update_discounts(&self, cart: &mut Cart, codes: &[String]) -> Result<()> {
        cart.remove_all_coupons_except(codes);
        let current = cart.discount();
        cart.remove_discount(current);

        let found = self.coupons.by_codes(codes);
        let mut failures = Vec::new();

        for code in codes {
            match found.iter().find(|coupon| coupon.code() == code) {
                Some(coupon) => match coupon.validate(cart) {
                    Ok(()) => {
                        let discount = coupon.discount_for(cart);
                        cart.add_coupon(coupon);
                        cart.add_discount(discount);
                    }
                    Err(err) => {
                        cart.remove_coupon(code);
                        failures.push(err.to_string());
                    }
                },
                None => {
                    cart.remove_coupon(code);
                    failures.push(format!("coupon '{code}' does not exist"));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(StoreError::InvalidCoupons(failures))
        }
    }

    /// Apply the shipping selection from a checkout request. No method in
    /// the request clears any current selection.
    pub fn select_shipping(&self, cart: &mut Cart, request: &CheckoutRequest) -> Result<()> {
        let Some(method_id) = &request.shipping_method else {
            cart.remove_shipping_method();
            return Ok(());
        };

        let method = self
            .shipping_methods
            .get(method_id)
            .filter(|method| method.is_enabled())
            .ok_or_else(|| {
                StoreError::shipping(format!("no such shipping method '{method_id}'"))
            })?;

        match &request.shipping_rate {
            Some(rate) => cart.set_shipping_method_with_rate(method, rate.clone()),
            None => cart.set_shipping_method(method),
        }
    }

    /// Turn the cart into a pending order. The cart must be non-empty, the
    /// terms accepted, and a shippable cart must have a shipping method.
    /// On success the caller's cart is left fresh and empty; on any failure
    /// it is untouched so the customer can correct the problem and retry.
    pub fn place_order(&self, cart: &mut Cart, request: &CheckoutRequest) -> Result<Order> {
        if cart.is_empty() {
            return Err(StoreError::validation("cannot check out an empty cart"));
        }
        if !request.terms_accepted {
            return Err(StoreError::validation(
                "terms and conditions must be accepted",
            ));
        }
        if cart.is_shipping_required() && cart.shipping_method().is_none() {
            return Err(StoreError::shipping(
                "a shipping method is required for this order",
            ));
        }

        let payment = match &request.payment_method {
            Some(payment_id) => Some(
                self.payment_methods
                    .get(payment_id)
                    .filter(|method| method.is_enabled())
                    .ok_or_else(|| {
                        StoreError::method(format!("no such payment method '{payment_id}'"))
                    })?,
            ),
            None => None,
        };

        let observers = cart.hooks().before_checkout.clone();
        observers.fire(request, cart);

        let mut cart = std::mem::replace(cart, Cart::new(&self.config));
        if let Some(method) = payment {
            cart.set_payment_method(method);
        }

        let factory = OrderFactory::new(
            &self.config,
            self.shipping_methods.as_ref(),
            self.payment_methods.as_ref(),
        );
        let order = factory.from_cart(cart, request);
        info!(order = %order.id(), total = %order.total(), "order placed");
        Ok(order)
    }

    /// Start payment for a placed order using its selected method.
    pub fn pay(&self, order: &Order) -> Result<PaymentOutcome> {
        let method = order
            .payment_method()
            .ok_or_else(|| StoreError::method("order has no payment method selected"))?;
        method.process(order)
    }
}
