use std::sync::Arc;

use crate::modules::payments::services::PaymentMethod;

/// Lookup contract over the configured payment methods.
pub trait PaymentMethodRegistry: Send + Sync {
    fn get(&self, id: &str) -> Option<Arc<dyn PaymentMethod>>;

    fn available(&self) -> Vec<Arc<dyn PaymentMethod>>;

    fn enabled(&self) -> Vec<Arc<dyn PaymentMethod>> {
        self.available()
            .into_iter()
            .filter(|method| method.is_enabled())
            .collect()
    }
}

/// Registry over a fixed method list.
#[derive(Default)]
pub struct StaticPaymentRegistry {
    methods: Vec<Arc<dyn PaymentMethod>>,
}

impl StaticPaymentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, method: Arc<dyn PaymentMethod>) {
        self.methods.push(method);
    }
}

impl PaymentMethodRegistry for StaticPaymentRegistry {
    fn get(&self, id: &str) -> Option<Arc<dyn PaymentMethod>> {
        self.methods
            .iter()
            .find(|method| method.id() == id)
            .cloned()
    }

    fn available(&self) -> Vec<Arc<dyn PaymentMethod>> {
        self.methods.clone()
    }
}
