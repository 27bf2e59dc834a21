pub mod bank_transfer;
pub mod payment_trait;
pub mod registry;

pub use bank_transfer::BankTransferPayment;
pub use payment_trait::{PaymentMethod, PaymentOutcome};
pub use registry::{PaymentMethodRegistry, StaticPaymentRegistry};
