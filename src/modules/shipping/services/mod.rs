pub mod courier;
pub mod flat_rate;
pub mod registry;
pub mod shipping_trait;

pub use courier::CourierShipping;
pub use flat_rate::FlatRateShipping;
pub use registry::{ShippingMethodRegistry, StaticShippingRegistry};
pub use shipping_trait::{MultiRateShipping, ShippingMethod};
