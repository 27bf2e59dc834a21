//! Coupons: discount definitions, validation rules, and code lookup.

pub mod models;
pub mod services;

pub use models::{Coupon, CouponDiscount};
pub use services::{CouponLookup, StaticCouponLookup};
