//! Pluggable payment: the method contract and built-in offline methods.

pub mod services;

pub use services::{
    BankTransferPayment, PaymentMethod, PaymentMethodRegistry, PaymentOutcome,
    StaticPaymentRegistry,
};
