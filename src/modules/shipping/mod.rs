//! Pluggable shipping: the method contract, tiered-rate extension, and the
//! built-in flat-rate and courier methods.

pub mod models;
pub mod services;

pub use models::Rate;
pub use services::{
    CourierShipping, FlatRateShipping, MultiRateShipping, ShippingMethod, ShippingMethodRegistry,
    StaticShippingRegistry,
};
