// Persisted order state.
//
// `OrderState` is the loosely-typed bag an order is saved to and restored
// from. Every field is optional: restore applies only what is present, on
// top of whatever the receiving ledger already holds. Restoring into a
// freshly constructed order reproduces the dump; restoring into a dirty
// order layers the saved fields over the existing ones, so callers that
// want a clean slate call `remove_items` first (the factory does).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::core::Result;
use crate::modules::orders::models::{Order, OrderItem, OrderStatus, StatusChange};
use crate::modules::shipping::services::ShippingMethodRegistry;
use crate::modules::taxes::models::TaxMap;

/// Persisted shipping selection: the method's own opaque state plus the
/// price that was charged and the chosen rate, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingState {
    pub method: serde_json::Value,

    /// Charged price. A negative value marks the price as unknown and
    /// forces recalculation on restore.
    pub price: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
}

/// Everything an order persists. All fields optional; absent fields leave
/// the receiving ledger untouched on restore.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    // timestamps persist as epoch seconds
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_history: Option<Vec<StatusChange>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,

    /// Customer encoded as a JSON string, possibly wrapped in a second
    /// string layer by older persistence paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

    /// Redundant plain-text customer id, written for external indexing.
    /// Ignored on restore; the encoded customer field wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ShippingState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_tax: Option<TaxMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_subtotal: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupons: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<TaxMap>,

    /// Informational only: restore recomputes the subtotal from the restored
    /// items and shipping price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Decimal>,

    /// Informational only: restore always recomputes the total from the
    /// restored fields, so any persisted value here is ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_included: Option<bool>,
}

impl Order {
    /// Capture the full ledger as a state bag suitable for persistence.
    /// `dump_state` then `restore_state` into a fresh order reproduces
    /// every accounting field.
    pub fn dump_state(&self) -> OrderState {
        OrderState {
            id: Some(self.id.clone()),
            key: self.key.clone(),
            number: self.number.clone(),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
            completed_at: self.completed_at,
            status: Some(self.status),
            status_history: Some(self.status_history.clone()),
            items: Some(self.items.values().cloned().collect()),
            customer: self.customer.encode().ok(),
            customer_id: self.customer.id().map(str::to_string),
            shipping: self.shipping_method.as_ref().map(|method| ShippingState {
                method: method.state(),
                price: self.shipping_price,
                rate: self.shipping_rate.clone(),
            }),
            payment: self
                .payment_method
                .as_ref()
                .map(|method| method.id().to_string()),
            customer_note: Some(self.customer_note.clone()),
            shipping_tax: Some(self.shipping_tax.clone()),
            product_subtotal: Some(self.product_subtotal),
            discount: Some(self.discount),
            coupons: Some(self.coupons.clone()),
            tax: Some(self.tax.clone()),
            subtotal: Some(self.subtotal),
            total: Some(self.total),
            tax_included: Some(self.tax_included),
        }
    }

    /// Apply persisted state on top of the current ledger.
    ///
    /// Items are re-added through `add_item` so their costs and the item
    /// hooks flow through the normal path. The shipping price is trusted
    /// when non-negative; a negative sentinel forces the method to
    /// recalculate against the restored items. Shipping tax applies
    /// additively on top of whatever the shipping selection contributed;
    /// product tax and product subtotal apply absolutely. The total is
    /// recomputed unconditionally at the end, which makes it consistent
    /// with the restored fields regardless of what the receiving ledger
    /// held before.
    pub fn restore_state(
        &mut self,
        state: OrderState,
        shipping_methods: &dyn ShippingMethodRegistry,
        payment_methods: &dyn crate::modules::payments::services::PaymentMethodRegistry,
    ) -> Result<()> {
        if let Some(id) = state.id {
            self.id = id;
        }
        if let Some(key) = state.key {
            self.key = Some(key);
        }
        if let Some(number) = state.number {
            self.number = Some(number);
        }
        if let Some(created_at) = state.created_at {
            self.created_at = created_at;
        }
        if let Some(updated_at) = state.updated_at {
            self.updated_at = updated_at;
        }
        if let Some(completed_at) = state.completed_at {
            self.completed_at = Some(completed_at);
        }
        if let Some(status) = state.status {
            self.status = status;
        }
        if let Some(history) = state.status_history {
            self.status_history = history;
        }

        if let Some(items) = state.items {
            for item in items {
                self.add_item(item);
            }
        }

        if let Some(raw) = state.customer {
            self.customer = crate::modules::customers::models::Customer::decode(&raw)?;
        }

        if let Some(shipping) = state.shipping {
            if let Some(method) = shipping_methods.find_for_state(&shipping.method) {
                if shipping.price >= Decimal::ZERO {
                    // trust the persisted charge rather than repricing; the
                    // tax contribution arrives through the shipping_tax field
                    self.shipping_method = Some(method);
                    self.shipping_rate = shipping.rate;
                    self.shipping_price = shipping.price;
                    self.subtotal += shipping.price;
                } else {
                    match shipping.rate {
                        Some(rate) => self.set_shipping_method_with_rate(method, rate)?,
                        None => self.set_shipping_method(method)?,
                    }
                }
            } else {
                debug!(state = %shipping.method, "no shipping method matches persisted state");
            }
        }

        if let Some(payment_id) = state.payment {
            match payment_methods.get(&payment_id) {
                Some(method) => self.payment_method = Some(method),
                None => debug!(id = %payment_id, "no payment method matches persisted state"),
            }
        }

        if let Some(note) = state.customer_note {
            self.customer_note = note;
        }
        if let Some(shipping_tax) = state.shipping_tax {
            self.shipping_tax.add(&shipping_tax);
            self.total_combined_tax = None;
        }
        if let Some(product_subtotal) = state.product_subtotal {
            self.subtotal += product_subtotal - self.product_subtotal;
            self.product_subtotal = product_subtotal;
        }
        if let Some(discount) = state.discount {
            self.discount = discount;
        }
        if let Some(coupons) = state.coupons {
            self.coupons = coupons;
        }
        if let Some(tax) = state.tax {
            self.set_tax(&tax);
        }
        if let Some(tax_included) = state.tax_included {
            self.tax_included = tax_included;
        }

        self.total =
            self.subtotal + self.tax.total() + self.shipping_tax.total() - self.discount;
        self.total_tax = None;
        self.total_combined_tax = None;
        Ok(())
    }

    /// Flat read-only snapshot for templating and audit output. Timestamps
    /// appear both raw and human-formatted; absent optional fields render
    /// as `false` so templates can branch on them directly.
    pub fn snapshot(&self) -> serde_json::Value {
        fn timestamps(at: DateTime<Utc>) -> serde_json::Value {
            json!({
                "timestamp": at.timestamp(),
                "format": at.format("%Y-%m-%d %H:%M:%S").to_string(),
            })
        }

        let items: Vec<serde_json::Value> = self
            .items
            .values()
            .map(|item| {
                json!({
                    "key": item.key,
                    "product_id": item.product_id,
                    "name": item.name,
                    "quantity": item.quantity,
                    "unit_price": item.unit_price,
                    "tax": item.tax,
                    "cost": item.cost(),
                    "meta": item.meta,
                })
            })
            .collect();

        json!({
            "id": self.id,
            "key": self.key.clone().map_or(json!(false), serde_json::Value::String),
            "number": self.number.clone().map_or(json!(false), serde_json::Value::String),
            "created_at": timestamps(self.created_at),
            "updated_at": timestamps(self.updated_at),
            "completed_at": self.completed_at.map_or(json!(false), timestamps),
            "status": self.status.to_string(),
            "customer": self.customer,
            "customer_note": self.customer_note,
            "items": items,
            "shipping": self.shipping_method.as_ref().map_or(json!(false), |method| json!({
                "id": method.id(),
                "name": method.name(),
                "price": self.shipping_price,
                "rate": self.shipping_rate,
            })),
            "payment": self.payment_method.as_ref().map_or(json!(false), |method| json!({
                "id": method.id(),
                "name": method.name(),
            })),
            "product_subtotal": self.product_subtotal,
            "subtotal": self.subtotal,
            "discount": self.discount,
            "coupons": self.coupons,
            "tax": self.tax.as_map(),
            "shipping_tax": self.shipping_tax.as_map(),
            "total_tax": self.tax.total(),
            "total": self.total,
            "tax_included": self.tax_included,
        })
    }
}
