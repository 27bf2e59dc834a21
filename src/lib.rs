//! Storefront core: cart and order accounting, taxes, coupons, and
//! pluggable shipping and payment strategies.
//!
//! The heart of the crate is the order ledger ([`Order`], aliased as
//! [`Cart`] for its pre-purchase lifecycle): a delta-maintained set of
//! accounting fields that stays internally consistent across item,
//! shipping, tax and discount mutations, and that can be dumped to and
//! restored from a loosely-typed persisted state. [`CheckoutService`]
//! is the customer-facing boundary that drives the ledger.

pub mod config;
pub mod core;
pub mod modules;

pub use config::StoreConfig;
pub use core::{Result, StoreError};
pub use modules::catalog::models::Product;
pub use modules::catalog::services::{
    DefaultItemKeyGenerator, ItemKeyGenerator, ProductCatalog, StaticCatalog,
};
pub use modules::checkout::{CheckoutRequest, CheckoutService};
pub use modules::coupons::{Coupon, CouponDiscount, CouponLookup, StaticCouponLookup};
pub use modules::customers::models::Customer;
pub use modules::orders::{
    Cart, Order, OrderFactory, OrderHooks, OrderItem, OrderState, OrderStatus, ShippingState,
    StatusChange,
};
pub use modules::payments::{
    BankTransferPayment, PaymentMethod, PaymentMethodRegistry, PaymentOutcome,
    StaticPaymentRegistry,
};
pub use modules::shipping::{
    CourierShipping, FlatRateShipping, MultiRateShipping, Rate, ShippingMethod,
    ShippingMethodRegistry, StaticShippingRegistry,
};
pub use modules::taxes::{TaxMap, TaxRates};
