pub mod lookup;

pub use lookup::{CouponLookup, StaticCouponLookup};
