// The order ledger.
//
// Cart and Order are two lifecycles of the same accounting shape: a cart is
// an order that has not been placed yet. Every mutation keeps the aggregate
// invariant
//
//     total == subtotal + sum(tax) + sum(shipping_tax) - discount
//
// where subtotal == product_subtotal + shipping price. Item and shipping
// mutations adjust the accumulators by deltas rather than recomputing, and
// the two total-tax aggregates are cached lazily: any mutation that touches
// a tax map drops the affected cache, any read repopulates it.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::core::{Result, StoreError};
use crate::modules::orders::hooks::OrderHooks;
use crate::modules::orders::models::{OrderItem, OrderStatus, StatusChange};
use crate::modules::payments::services::PaymentMethod;
use crate::modules::shipping::services::ShippingMethod;
use crate::modules::taxes::models::TaxMap;

/// A cart is the pre-purchase lifecycle of the order ledger; the accounting
/// rules are identical.
pub type Cart = Order;

#[derive(Debug, Clone)]
pub struct Order {
    pub(crate) id: String,
    pub(crate) key: Option<String>,
    pub(crate) number: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) completed_at: Option<DateTime<Utc>>,
    pub(crate) customer: crate::modules::customers::models::Customer,
    pub(crate) items: BTreeMap<String, OrderItem>,
    pub(crate) shipping_method: Option<Arc<dyn ShippingMethod>>,
    pub(crate) shipping_rate: Option<String>,
    pub(crate) shipping_price: Decimal,
    pub(crate) payment_method: Option<Arc<dyn PaymentMethod>>,
    pub(crate) product_subtotal: Decimal,
    pub(crate) subtotal: Decimal,
    pub(crate) total: Decimal,
    pub(crate) discount: Decimal,
    pub(crate) coupons: Vec<String>,
    pub(crate) tax: TaxMap,
    pub(crate) shipping_tax: TaxMap,
    pub(crate) total_tax: Option<Decimal>,
    pub(crate) total_combined_tax: Option<Decimal>,
    pub(crate) status: OrderStatus,
    pub(crate) status_history: Vec<StatusChange>,
    pub(crate) customer_note: String,
    pub(crate) tax_included: bool,
    pub(crate) hooks: OrderHooks,
}

impl Order {
    /// Empty ledger for a guest, with tax maps zeroed over the recognized
    /// class list.
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_hooks(config, OrderHooks::default())
    }

    pub fn with_hooks(config: &StoreConfig, hooks: OrderHooks) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            key: None,
            number: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
            customer: Default::default(),
            items: BTreeMap::new(),
            shipping_method: None,
            shipping_rate: None,
            shipping_price: Decimal::ZERO,
            payment_method: None,
            product_subtotal: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            total: Decimal::ZERO,
            discount: Decimal::ZERO,
            coupons: Vec::new(),
            tax: TaxMap::zeroed(config.tax_classes.iter().cloned()),
            shipping_tax: TaxMap::zeroed(config.tax_classes.iter().cloned()),
            total_tax: None,
            total_combined_tax: None,
            status: OrderStatus::Pending,
            status_history: Vec::new(),
            customer_note: String::new(),
            tax_included: false,
            hooks,
        }
    }

    // -- identity & metadata --------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    pub fn set_number(&mut self, number: impl Into<String>) {
        self.number = Some(number.into());
    }

    /// Security key handed out with order links.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = Some(key.into());
    }

    pub fn title(&self) -> String {
        match &self.number {
            Some(number) => format!("Order {}", number),
            None => "Order".to_string(),
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = at;
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Stamp completion with the current time.
    pub fn mark_completed(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    pub fn customer(&self) -> &crate::modules::customers::models::Customer {
        &self.customer
    }

    pub fn set_customer(&mut self, customer: crate::modules::customers::models::Customer) {
        self.customer = customer;
    }

    pub fn customer_note(&self) -> &str {
        &self.customer_note
    }

    pub fn set_customer_note(&mut self, note: impl Into<String>) {
        self.customer_note = note.into();
    }

    pub fn tax_included(&self) -> bool {
        self.tax_included
    }

    pub fn set_tax_included(&mut self, tax_included: bool) {
        self.tax_included = tax_included;
    }

    pub fn hooks(&self) -> &OrderHooks {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut OrderHooks {
        &mut self.hooks
    }

    // -- items -----------------------------------------------------------

    pub fn items(&self) -> &BTreeMap<String, OrderItem> {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_item(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Item lookup; a missing key is logged and reported as `None` rather
    /// than raised, matching how page-level callers treat it.
    pub fn get_item(&self, key: &str) -> Option<&OrderItem> {
        let item = self.items.get(key);
        if item.is_none() {
            warn!(order = %self.id, item = %key, "no such item in order");
        }
        item
    }

    /// Insert a line item under its derived key, replacing any entry already
    /// at that key, and roll its cost and tax into the accumulators. The
    /// item's `tax` is trusted as a correct quantity-scaled total.
    pub fn add_item(&mut self, item: OrderItem) {
        let observers = self.hooks.item_added.clone();
        observers.fire(&item, self);

        let cost = item.cost();
        let tax = item.tax;
        self.items.insert(item.key.clone(), item);
        self.product_subtotal += cost;
        self.subtotal += cost;
        self.total += cost + tax;
        self.total_tax = None;
        self.total_combined_tax = None;
    }

    /// Remove a line item, reversing exactly what `add_item` accumulated.
    /// Absent keys are a no-op returning `None`; callers must check.
    pub fn remove_item(&mut self, key: &str) -> Option<OrderItem> {
        if let Some(item) = self.items.get(key) {
            let observers = self.hooks.item_removed.clone();
            observers.fire(item, self);
        }

        let item = self.items.remove(key)?;
        self.total -= item.cost() + item.tax;
        self.subtotal -= item.cost();
        self.product_subtotal -= item.cost();
        self.total_tax = None;
        self.total_combined_tax = None;
        Some(item)
    }

    /// Change an item's quantity. Implemented as remove-then-readd so cost
    /// and tax contributions flow through the normal paths; a non-positive
    /// quantity drops the item entirely. If the re-add cannot be completed
    /// the removed item is put back unchanged.
    pub fn update_quantity(&mut self, key: &str, quantity: i64) -> Result<()> {
        if !self.items.contains_key(key) {
            return Err(StoreError::item_not_found(key));
        }

        if quantity <= 0 {
            self.remove_item(key);
            return Ok(());
        }

        let quantity =
            u32::try_from(quantity).map_err(|_| StoreError::InvalidQuantity(quantity))?;

        let Some(mut item) = self.remove_item(key) else {
            return Err(StoreError::item_not_found(key));
        };

        let original = item.clone();
        if let Err(err) = item.set_quantity(quantity) {
            self.add_item(original);
            return Err(err);
        }

        self.add_item(item);
        Ok(())
    }

    /// Remove all items, coupons and the shipping selection, and zero every
    /// accumulator. Used when rebuilding the ledger's contents wholesale.
    pub fn remove_items(&mut self) {
        self.remove_shipping_method();
        self.items.clear();
        self.coupons.clear();
        self.product_subtotal = Decimal::ZERO;
        self.subtotal = Decimal::ZERO;
        self.total = Decimal::ZERO;
        self.discount = Decimal::ZERO;
        self.tax.zero_out();
        self.total_tax = None;
        self.total_combined_tax = None;
    }

    // -- shipping --------------------------------------------------------

    pub fn shipping_method(&self) -> Option<&Arc<dyn ShippingMethod>> {
        self.shipping_method.as_ref()
    }

    pub fn shipping_rate(&self) -> Option<&str> {
        self.shipping_rate.as_deref()
    }

    pub fn shipping_price(&self) -> Decimal {
        self.shipping_price
    }

    /// Select a single-rate shipping method. Multi-rate methods must go
    /// through [`Order::set_shipping_method_with_rate`].
    pub fn set_shipping_method(&mut self, method: Arc<dyn ShippingMethod>) -> Result<()> {
        self.select_shipping(method, None)
    }

    pub fn set_shipping_method_with_rate(
        &mut self,
        method: Arc<dyn ShippingMethod>,
        rate_id: impl Into<String>,
    ) -> Result<()> {
        self.select_shipping(method, Some(rate_id.into()))
    }

    fn select_shipping(
        &mut self,
        method: Arc<dyn ShippingMethod>,
        rate_id: Option<String>,
    ) -> Result<()> {
        self.remove_shipping_method();

        let price = match method.as_multi_rate() {
            Some(multi) => {
                let rate_id = rate_id.clone().ok_or_else(|| {
                    StoreError::shipping(format!("method '{}' requires a rate", method.id()))
                })?;
                multi.calculate_rate(self, &rate_id)?
            }
            None => method.calculate(self)?,
        };

        let contribution = method.shipping_tax(self);
        let filters = self.hooks.shipping_tax.clone();
        let contribution = filters.apply(contribution, self);

        self.shipping_method = Some(method);
        self.shipping_rate = rate_id;
        self.shipping_price = price;
        self.subtotal += price;
        self.shipping_tax.add(&contribution);
        self.total += price + self.shipping_tax.total();
        self.total_combined_tax = None;
        Ok(())
    }

    /// Fully reverse the current shipping selection: price out of subtotal,
    /// price plus shipping tax out of total, tax map back to zero.
    pub fn remove_shipping_method(&mut self) {
        self.subtotal -= self.shipping_price;
        self.total -= self.shipping_price + self.shipping_tax.total();

        self.shipping_method = None;
        self.shipping_rate = None;
        self.shipping_price = Decimal::ZERO;
        self.shipping_tax.zero_out();
        self.total_combined_tax = None;
    }

    /// Whether the given method (and rate, when given) is the active
    /// selection. Identity comparison, never concrete-type comparison.
    pub fn has_shipping_method(&self, method: &dyn ShippingMethod, rate_id: Option<&str>) -> bool {
        match &self.shipping_method {
            Some(current) if current.id() == method.id() => match rate_id {
                Some(rate_id) => self.shipping_rate.as_deref() == Some(rate_id),
                None => true,
            },
            _ => false,
        }
    }

    /// True when at least one line item needs to be shipped.
    pub fn is_shipping_required(&self) -> bool {
        self.items.values().any(|item| item.requires_shipping)
    }

    // -- payment ---------------------------------------------------------

    pub fn payment_method(&self) -> Option<&Arc<dyn PaymentMethod>> {
        self.payment_method.as_ref()
    }

    pub fn set_payment_method(&mut self, method: Arc<dyn PaymentMethod>) {
        self.payment_method = Some(method);
    }

    pub fn clear_payment_method(&mut self) {
        self.payment_method = None;
    }

    // -- taxes -----------------------------------------------------------

    pub fn tax(&self) -> &TaxMap {
        &self.tax
    }

    pub fn shipping_tax(&self) -> &TaxMap {
        &self.shipping_tax
    }

    /// Additively merge a per-class delta into the product tax map. This is
    /// the only path by which product tax changes outside reconstruction;
    /// callers pass deltas, never absolute values.
    pub fn update_taxes(&mut self, delta: &TaxMap) {
        self.total_tax = None;
        self.total_combined_tax = None;
        self.tax.add(delta);
    }

    /// Absolute replace of the product tax map, for reconstruction from
    /// persisted state only.
    pub fn set_tax(&mut self, tax: &TaxMap) {
        self.total_tax = None;
        self.total_combined_tax = None;
        self.tax.replace(tax);
    }

    /// Absolute replace of the shipping tax map, for reconstruction from
    /// persisted state only.
    pub fn set_shipping_tax(&mut self, tax: &TaxMap) {
        self.total_combined_tax = None;
        self.shipping_tax.replace(tax);
    }

    /// Sum of the product tax map, cached until the next tax mutation.
    pub fn total_tax(&mut self) -> Decimal {
        if self.total_tax.is_none() {
            self.total_tax = Some(self.tax.total());
        }
        self.total_tax.unwrap_or(Decimal::ZERO)
    }

    /// Product and shipping tax merged per class.
    pub fn combined_tax(&self) -> TaxMap {
        self.tax.merged(&self.shipping_tax)
    }

    /// Sum of the combined tax map, cached independently of `total_tax`.
    pub fn total_combined_tax(&mut self) -> Decimal {
        if self.total_combined_tax.is_none() {
            self.total_combined_tax = Some(self.combined_tax().total());
        }
        self.total_combined_tax.unwrap_or(Decimal::ZERO)
    }

    // -- discounts & coupons --------------------------------------------

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// Apply a discount as a pure delta against the total. The ledger does
    /// not clamp the running discount; callers own that invariant.
    pub fn add_discount(&mut self, amount: Decimal) {
        self.discount += amount;
        self.total -= amount;
    }

    pub fn remove_discount(&mut self, amount: Decimal) {
        self.discount -= amount;
        self.total += amount;
    }

    pub fn coupons(&self) -> &[String] {
        &self.coupons
    }

    /// Record a coupon code. Adding a code already present is a no-op.
    pub fn add_coupon(&mut self, code: impl Into<String>) {
        let code = code.into();
        if !self.coupons.contains(&code) {
            self.coupons.push(code);
        }
    }

    pub fn remove_coupon(&mut self, code: &str) {
        self.coupons.retain(|existing| existing != code);
    }

    /// Drop every recorded coupon whose code is not in `codes`.
    pub fn remove_all_coupons_except(&mut self, codes: &[String]) {
        self.coupons.retain(|existing| codes.contains(existing));
    }

    // -- status ----------------------------------------------------------

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn status_history(&self) -> &[StatusChange] {
        &self.status_history
    }

    /// Replace the status; the transition is recorded only when the status
    /// actually changes. Any-to-any transitions are legal at this layer.
    pub fn set_status(&mut self, status: OrderStatus, message: impl Into<String>) {
        let current = self.status;
        self.status = status;

        if current != status {
            self.status_history.push(StatusChange {
                old_status: current,
                new_status: status,
                message: message.into(),
            });
        }
    }

    // -- totals ----------------------------------------------------------

    pub fn product_subtotal(&self) -> Decimal {
        self.product_subtotal
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn total(&self) -> Decimal {
        self.total
    }
}
