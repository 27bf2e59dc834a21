//! Checkout: the customer-facing boundary over the cart ledger.

pub mod models;
pub mod services;

pub use models::CheckoutRequest;
pub use services::CheckoutService;
