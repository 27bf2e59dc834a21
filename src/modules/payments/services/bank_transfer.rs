// Offline bank transfer. No gateway round trip; the order settles when the
// merchant confirms the wire manually.

use tracing::info;

use crate::core::Result;
use crate::modules::orders::models::Order;
use crate::modules::payments::services::{PaymentMethod, PaymentOutcome};

#[derive(Debug)]
pub struct BankTransferPayment {
    enabled: bool,
    account_details: String,
}

impl BankTransferPayment {
    pub fn new(account_details: impl Into<String>) -> Self {
        Self {
            enabled: true,
            account_details: account_details.into(),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Wire instructions shown to the customer after checkout.
    pub fn account_details(&self) -> &str {
        &self.account_details
    }
}

impl PaymentMethod for BankTransferPayment {
    fn id(&self) -> &str {
        "bank-transfer"
    }

    fn name(&self) -> &str {
        "Bank transfer"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn process(&self, order: &Order) -> Result<PaymentOutcome> {
        info!(order = %order.id(), total = %order.total(), "awaiting bank transfer");
        Ok(PaymentOutcome::Confirmed { reference: None })
    }
}
