use std::sync::Arc;

use crate::modules::shipping::services::ShippingMethod;

/// Lookup contract over the configured shipping methods.
pub trait ShippingMethodRegistry: Send + Sync {
    fn get(&self, id: &str) -> Option<Arc<dyn ShippingMethod>>;

    /// Every configured method, enabled or not
    fn available(&self) -> Vec<Arc<dyn ShippingMethod>>;

    /// Only methods currently enabled
    fn enabled(&self) -> Vec<Arc<dyn ShippingMethod>> {
        self.available()
            .into_iter()
            .filter(|method| method.is_enabled())
            .collect()
    }

    /// Resolve a method from its persisted opaque state. The default
    /// implementation matches on the `id` field every `state()` emits.
    fn find_for_state(&self, state: &serde_json::Value) -> Option<Arc<dyn ShippingMethod>> {
        state
            .get("id")
            .and_then(serde_json::Value::as_str)
            .and_then(|id| self.get(id))
    }
}

/// Registry over a fixed method list.
#[derive(Default)]
pub struct StaticShippingRegistry {
    methods: Vec<Arc<dyn ShippingMethod>>,
}

impl StaticShippingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, method: Arc<dyn ShippingMethod>) {
        self.methods.push(method);
    }
}

impl ShippingMethodRegistry for StaticShippingRegistry {
    fn get(&self, id: &str) -> Option<Arc<dyn ShippingMethod>> {
        self.methods
            .iter()
            .find(|method| method.id() == id)
            .cloned()
    }

    fn available(&self) -> Vec<Arc<dyn ShippingMethod>> {
        self.methods.clone()
    }
}
