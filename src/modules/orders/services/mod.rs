pub mod factory;

pub use factory::OrderFactory;
