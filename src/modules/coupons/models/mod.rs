pub mod coupon;

pub use coupon::{Coupon, CouponDiscount};
