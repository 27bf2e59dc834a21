pub mod catalog;
pub mod checkout;
pub mod coupons;
pub mod customers;
pub mod orders;
pub mod payments;
pub mod shipping;
pub mod taxes;
