use std::collections::HashMap;

use crate::modules::coupons::models::Coupon;

/// Resolves coupon codes to coupon definitions. Unknown codes are simply
/// absent from the result; callers decide whether that is an error.
pub trait CouponLookup: Send + Sync {
    fn by_codes(&self, codes: &[String]) -> Vec<Coupon>;
}

/// Lookup over a fixed in-memory coupon set.
#[derive(Default)]
pub struct StaticCouponLookup {
    coupons: HashMap<String, Coupon>,
}

impl StaticCouponLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coupon: Coupon) {
        self.coupons.insert(coupon.code().to_string(), coupon);
    }
}

impl CouponLookup for StaticCouponLookup {
    fn by_codes(&self, codes: &[String]) -> Vec<Coupon> {
        codes
            .iter()
            .filter_map(|code| self.coupons.get(code).cloned())
            .collect()
    }
}
