// Ledger consistency under arbitrary mutation sequences.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use storefront::{
    Order, OrderItem, Product, Rate, ShippingMethod, StoreConfig, StoreError, TaxMap,
};

#[derive(Debug)]
struct FixedShipping {
    price: Decimal,
    tax: Decimal,
}

impl ShippingMethod for FixedShipping {
    fn id(&self) -> &str {
        "fixed"
    }

    fn name(&self) -> &str {
        "Fixed"
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn calculate(&self, _order: &Order) -> storefront::Result<Decimal> {
        Ok(self.price)
    }

    fn shipping_tax(&self, _order: &Order) -> TaxMap {
        TaxMap::from_amounts([("standard", self.tax)])
    }
}

#[derive(Debug, Clone)]
enum Op {
    AddItem { price_cents: u32, quantity: u32, tax_cents: u32 },
    RemoveItem { slot: usize },
    UpdateQuantity { slot: usize, quantity: i64 },
    SetShipping { price_cents: u32, tax_cents: u32 },
    RemoveShipping,
    UpdateTaxes { delta_cents: i32 },
    AddDiscount { cents: u32 },
    RemoveDiscount { cents: u32 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u32..100_000, 1u32..20, 0u32..20_000).prop_map(|(price_cents, quantity, tax_cents)| {
            Op::AddItem {
                price_cents,
                quantity,
                tax_cents,
            }
        }),
        (0usize..8).prop_map(|slot| Op::RemoveItem { slot }),
        (0usize..8, -2i64..30).prop_map(|(slot, quantity)| Op::UpdateQuantity { slot, quantity }),
        (0u32..5_000, 0u32..1_000)
            .prop_map(|(price_cents, tax_cents)| Op::SetShipping { price_cents, tax_cents }),
        Just(Op::RemoveShipping),
        (-5_000i32..5_000).prop_map(|delta_cents| Op::UpdateTaxes { delta_cents }),
        (0u32..3_000).prop_map(|cents| Op::AddDiscount { cents }),
        (0u32..3_000).prop_map(|cents| Op::RemoveDiscount { cents }),
    ]
}

fn cents(value: u32) -> Decimal {
    Decimal::new(i64::from(value), 2)
}

fn apply(order: &mut Order, op: Op, counter: &mut u32) {
    match op {
        Op::AddItem {
            price_cents,
            quantity,
            tax_cents,
        } => {
            *counter += 1;
            let product = Product::new(format!("p-{counter}"), "Product", cents(price_cents))
                .with_tax_classes(["standard"]);
            let mut item = OrderItem::new(&product, quantity, cents(tax_cents));
            item.set_key(format!("k-{counter}"));
            let tax = item.tax;
            order.add_item(item);
            order.update_taxes(&TaxMap::from_amounts([("standard", tax)]));
        }
        Op::RemoveItem { slot } => {
            if let Some(key) = order.items().keys().nth(slot).cloned() {
                if let Some(removed) = order.remove_item(&key) {
                    order.update_taxes(&TaxMap::from_amounts([("standard", -removed.tax)]));
                }
            }
        }
        Op::UpdateQuantity { slot, quantity } => {
            if let Some(key) = order.items().keys().nth(slot).cloned() {
                let before = order.items()[&key].tax;
                match order.update_quantity(&key, quantity) {
                    Ok(()) => {
                        let after = order.items().get(&key).map(|i| i.tax).unwrap_or_default();
                        order.update_taxes(&TaxMap::from_amounts([("standard", after - before)]));
                    }
                    Err(StoreError::InvalidQuantity(_)) => {}
                    Err(err) => panic!("unexpected error: {err}"),
                }
            }
        }
        Op::SetShipping {
            price_cents,
            tax_cents,
        } => {
            let method = Arc::new(FixedShipping {
                price: cents(price_cents),
                tax: cents(tax_cents),
            });
            order.set_shipping_method(method).unwrap();
        }
        Op::RemoveShipping => order.remove_shipping_method(),
        Op::UpdateTaxes { delta_cents } => {
            order.update_taxes(&TaxMap::from_amounts([(
                "standard",
                Decimal::new(i64::from(delta_cents), 2),
            )]));
        }
        Op::AddDiscount { cents: amount } => order.add_discount(cents(amount)),
        Op::RemoveDiscount { cents: amount } => order.remove_discount(cents(amount)),
    }
}

proptest! {
    #[test]
    fn total_stays_consistent(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let mut order = Order::new(&StoreConfig::with_tax_classes(["standard"]));
        let mut counter = 0;

        for op in ops {
            apply(&mut order, op, &mut counter);

            let expected = order.subtotal()
                + order.tax().total()
                + order.shipping_tax().total()
                - order.discount();
            prop_assert_eq!(order.total(), expected);
            prop_assert_eq!(order.subtotal(), order.product_subtotal() + order.shipping_price());
        }
    }

    #[test]
    fn cached_totals_match_maps(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let mut order = Order::new(&StoreConfig::with_tax_classes(["standard"]));
        let mut counter = 0;

        for op in ops {
            apply(&mut order, op, &mut counter);

            let product_tax = order.tax().total();
            let shipping_tax = order.shipping_tax().total();
            prop_assert_eq!(order.total_tax(), product_tax);
            prop_assert_eq!(order.total_combined_tax(), product_tax + shipping_tax);
        }
    }

    #[test]
    fn item_sums_match_product_subtotal(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let mut order = Order::new(&StoreConfig::with_tax_classes(["standard"]));
        let mut counter = 0;

        for op in ops {
            apply(&mut order, op, &mut counter);

            let item_sum: Decimal = order.items().values().map(OrderItem::cost).sum();
            prop_assert_eq!(order.product_subtotal(), item_sum);
        }
    }
}

#[test]
fn remove_items_resets_to_empty_ledger() {
    let mut order = Order::new(&StoreConfig::with_tax_classes(["standard"]));
    let product = Product::new("p", "Product", dec!(12.50)).with_tax_classes(["standard"]);
    let mut item = OrderItem::new(&product, 3, dec!(7.50));
    item.set_key("k");
    order.add_item(item);
    order.update_taxes(&TaxMap::from_amounts([("standard", dec!(7.50))]));
    order
        .set_shipping_method(Arc::new(FixedShipping {
            price: dec!(4),
            tax: dec!(1),
        }))
        .unwrap();
    order.add_discount(dec!(2));

    order.remove_items();

    assert_eq!(order.total(), Decimal::ZERO);
    assert_eq!(order.subtotal(), Decimal::ZERO);
    assert_eq!(order.product_subtotal(), Decimal::ZERO);
    assert_eq!(order.discount(), Decimal::ZERO);
    assert!(order.tax().is_zero());
    assert!(order.shipping_tax().is_zero());
}

#[test]
fn multi_rate_selection_is_tracked_on_the_order() {
    use storefront::{MultiRateShipping, Result};

    #[derive(Debug)]
    struct Tiered;

    impl ShippingMethod for Tiered {
        fn id(&self) -> &str {
            "tiered"
        }
        fn name(&self) -> &str {
            "Tiered"
        }
        fn is_enabled(&self) -> bool {
            true
        }
        fn calculate(&self, _order: &Order) -> Result<Decimal> {
            Err(StoreError::shipping("rate required"))
        }
        fn as_multi_rate(&self) -> Option<&dyn MultiRateShipping> {
            Some(self)
        }
    }

    impl MultiRateShipping for Tiered {
        fn rates(&self, _order: &Order) -> Vec<Rate> {
            vec![
                Rate::new("a", "A", dec!(3)),
                Rate::new("b", "B", dec!(9)),
            ]
        }
        fn calculate_rate(&self, _order: &Order, rate_id: &str) -> Result<Decimal> {
            self.rates(_order)
                .into_iter()
                .find(|rate| rate.id == rate_id)
                .map(|rate| rate.price)
                .ok_or_else(|| StoreError::shipping("unknown rate"))
        }
    }

    let mut order = Order::new(&StoreConfig::with_tax_classes(["standard"]));
    let tiered = Arc::new(Tiered);

    order
        .set_shipping_method_with_rate(Arc::clone(&tiered) as Arc<dyn ShippingMethod>, "b")
        .unwrap();
    assert_eq!(order.shipping_price(), dec!(9));
    assert_eq!(order.shipping_rate(), Some("b"));

    // reselecting a different tier fully reverses the first
    order
        .set_shipping_method_with_rate(Arc::clone(&tiered) as Arc<dyn ShippingMethod>, "a")
        .unwrap();
    assert_eq!(order.shipping_price(), dec!(3));
    assert_eq!(order.subtotal(), dec!(3));
}
