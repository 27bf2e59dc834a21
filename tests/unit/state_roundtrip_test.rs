// Persistence behavior: dump/restore round trips, the additive fields of
// the restore protocol, and the snapshot shape.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use storefront::{
    BankTransferPayment, Customer, FlatRateShipping, Order, OrderFactory, OrderHooks, OrderItem,
    OrderState, OrderStatus, Product, ShippingMethodRegistry, StaticPaymentRegistry,
    StaticShippingRegistry, StoreConfig, StoreError, TaxMap, TaxRates,
};

fn config() -> StoreConfig {
    StoreConfig::with_tax_classes(["standard", "reduced"])
}

fn registries() -> (StaticShippingRegistry, StaticPaymentRegistry) {
    let mut shipping = StaticShippingRegistry::new();
    let mut rates = TaxRates::default();
    rates.set_rate("standard", dec!(0.20)).unwrap();
    shipping.register(Arc::new(FlatRateShipping::new(dec!(10)).with_tax_rates(rates)));

    let mut payments = StaticPaymentRegistry::new();
    payments.register(Arc::new(BankTransferPayment::new("IBAN DE00")));
    (shipping, payments)
}

fn populated_order() -> Order {
    let mut order = Order::new(&config());
    order.set_number("2001");
    order.set_customer(Customer::registered("c1", "Ada", "ada@example.com"));
    order.set_customer_note("fragile");

    let product = Product::new("p1", "Teapot", dec!(45)).with_tax_classes(["standard"]);
    let mut item = OrderItem::new(&product, 2, dec!(18));
    item.set_key("teapot");
    order.add_item(item);
    order.update_taxes(&TaxMap::from_amounts([("standard", dec!(18))]));

    order.add_coupon("WELCOME");
    order.add_discount(dec!(5));
    order.set_status(OrderStatus::Processing, "payment received");
    order
}

#[test]
fn full_round_trip_through_json() {
    let (shipping, payments) = registries();
    let mut order = populated_order();
    order
        .set_shipping_method(shipping.get("flat-rate").unwrap())
        .unwrap();
    let expected_total = order.total();

    let state = order.dump_state();
    let json = serde_json::to_string_pretty(&state).unwrap();
    let decoded: OrderState = serde_json::from_str(&json).unwrap();

    let cfg = config();
    let factory = OrderFactory::new(&cfg, &shipping, &payments);
    let mut restored = factory.restore(decoded, OrderHooks::new()).unwrap();

    assert_eq!(restored.id(), order.id());
    assert_eq!(restored.number(), Some("2001"));
    assert_eq!(restored.customer(), order.customer());
    assert_eq!(restored.customer_note(), "fragile");
    assert_eq!(restored.items().len(), 1);
    assert_eq!(restored.product_subtotal(), dec!(90));
    assert_eq!(restored.subtotal(), dec!(100));
    assert_eq!(restored.shipping_price(), dec!(10));
    assert_eq!(restored.shipping_tax().amount("standard"), dec!(2.00));
    assert_eq!(restored.tax().amount("standard"), dec!(18));
    assert_eq!(restored.discount(), dec!(5));
    assert_eq!(restored.coupons(), order.coupons());
    assert_eq!(restored.status(), OrderStatus::Processing);
    assert_eq!(restored.total(), expected_total);
    assert_eq!(restored.total_tax(), dec!(18));
    assert_eq!(restored.total_combined_tax(), dec!(20.00));
}

#[test]
fn shipping_tax_restores_additively() {
    // a ledger already carrying 3 of shipping tax that restores a state
    // carrying 5 ends at 8, not 5
    let (shipping, payments) = registries();
    let mut order = Order::new(&config());
    order.set_shipping_tax(&TaxMap::from_amounts([("standard", dec!(3))]));

    let mut state = OrderState::default();
    state.shipping_tax = Some(TaxMap::from_amounts([("standard", dec!(5))]));

    order.restore_state(state, &shipping, &payments).unwrap();
    assert_eq!(order.shipping_tax().amount("standard"), dec!(8));
}

#[test]
fn items_restore_through_the_normal_add_path() {
    let (shipping, payments) = registries();
    let product = Product::new("p1", "Teapot", dec!(45)).with_tax_classes(["standard"]);
    let mut item = OrderItem::new(&product, 2, dec!(18));
    item.set_key("teapot");

    let mut state = OrderState::default();
    state.items = Some(vec![item]);

    let mut order = Order::new(&config());
    order.restore_state(state, &shipping, &payments).unwrap();

    assert_eq!(order.product_subtotal(), dec!(90));
    assert_eq!(order.subtotal(), dec!(90));
    assert_eq!(order.total(), dec!(90));
}

#[test]
fn product_tax_and_subtotal_restore_absolutely() {
    let (shipping, payments) = registries();
    let mut order = Order::new(&config());
    order.update_taxes(&TaxMap::from_amounts([("standard", dec!(99))]));

    let mut state = OrderState::default();
    state.tax = Some(TaxMap::from_amounts([("standard", dec!(7))]));
    state.product_subtotal = Some(dec!(70));

    order.restore_state(state, &shipping, &payments).unwrap();

    assert_eq!(order.tax().amount("standard"), dec!(7));
    assert_eq!(order.product_subtotal(), dec!(70));
    assert_eq!(order.subtotal(), dec!(70));
    assert_eq!(order.total(), dec!(77));
}

#[test]
fn unrecognized_tax_classes_are_dropped_on_restore() {
    let (shipping, payments) = registries();
    let mut state = OrderState::default();
    state.tax = Some(TaxMap::from_amounts([
        ("standard", dec!(2)),
        ("imaginary", dec!(40)),
    ]));

    let mut order = Order::new(&config());
    order.restore_state(state, &shipping, &payments).unwrap();

    assert!(!order.tax().contains_class("imaginary"));
    assert_eq!(order.total_tax(), dec!(2));
    // the recognized-but-absent class stays present at zero
    assert!(order.tax().contains_class("reduced"));
    assert_eq!(order.tax().amount("reduced"), Decimal::ZERO);
}

#[test]
fn negative_shipping_price_forces_recalculation() {
    let (shipping, payments) = registries();
    let mut state = OrderState::default();
    let product = Product::new("p1", "Teapot", dec!(45));
    let mut item = OrderItem::new(&product, 1, dec!(0));
    item.set_key("teapot");
    state.items = Some(vec![item]);
    state.shipping = Some(storefront::ShippingState {
        method: json!({"id": "flat-rate"}),
        price: dec!(-1),
        rate: None,
    });

    let mut order = Order::new(&config());
    order.restore_state(state, &shipping, &payments).unwrap();

    assert_eq!(order.shipping_price(), dec!(10));
    assert_eq!(order.shipping_tax().amount("standard"), dec!(2.00));
}

#[test]
fn customer_survives_double_encoding() {
    let (shipping, payments) = registries();
    let customer = Customer::registered("c9", "Grace", "grace@example.com");
    let once = customer.encode().unwrap();
    let twice = serde_json::to_string(&once).unwrap();

    let mut state = OrderState::default();
    state.customer = Some(twice);

    let mut order = Order::new(&config());
    order.restore_state(state, &shipping, &payments).unwrap();
    assert_eq!(order.customer(), &customer);
}

#[test]
fn corrupt_customer_payload_is_an_error() {
    let (shipping, payments) = registries();
    let mut state = OrderState::default();
    state.customer = Some("##garbage##".to_string());

    let mut order = Order::new(&config());
    assert!(matches!(
        order.restore_state(state, &shipping, &payments),
        Err(StoreError::CorruptState(_))
    ));
}

#[test]
fn order_fetched_filter_runs_on_restore() {
    let (shipping, payments) = registries();
    let mut hooks = OrderHooks::new();
    hooks.order_fetched.register(|mut order: Order, _state| {
        order.set_customer_note("audited");
        order
    });

    let cfg = config();
    let factory = OrderFactory::new(&cfg, &shipping, &payments);
    let restored = factory.restore(OrderState::default(), hooks).unwrap();
    assert_eq!(restored.customer_note(), "audited");
}

#[test]
fn snapshot_renders_absent_fields_as_false() {
    let order = Order::new(&config());
    let snap = order.snapshot();

    assert_eq!(snap["number"], json!(false));
    assert_eq!(snap["key"], json!(false));
    assert_eq!(snap["completed_at"], json!(false));
    assert_eq!(snap["shipping"], json!(false));
    assert_eq!(snap["payment"], json!(false));
    assert!(snap["created_at"]["format"].is_string());
}

#[test]
fn snapshot_reflects_ledger_fields() {
    let (shipping, _payments) = registries();
    let mut order = populated_order();
    order
        .set_shipping_method(shipping.get("flat-rate").unwrap())
        .unwrap();

    let snap = order.snapshot();
    assert_eq!(snap["number"], json!("2001"));
    assert_eq!(snap["status"], json!("processing"));
    assert_eq!(snap["shipping"]["id"], json!("flat-rate"));
    assert_eq!(snap["coupons"], json!(["WELCOME"]));
    assert_eq!(snap["total"], json!(order.total()));
}
