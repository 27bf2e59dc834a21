//! Order and cart ledger: line items, totals, taxes, discounts, status
//! lifecycle, and persisted-state reconstruction.

pub mod hooks;
pub mod models;
pub mod services;

pub use hooks::OrderHooks;
pub use models::{Cart, Order, OrderItem, OrderState, OrderStatus, ShippingState, StatusChange};
pub use services::OrderFactory;
