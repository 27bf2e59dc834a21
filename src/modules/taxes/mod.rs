// Taxes module

pub mod models;
pub mod services;

pub use models::TaxMap;
pub use services::TaxRates;
