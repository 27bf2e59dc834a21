// Customers module

pub mod models;

pub use models::Customer;
