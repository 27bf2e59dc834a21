use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Result, StoreError};
use crate::modules::orders::models::Order;

/// How a coupon computes its discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouponDiscount {
    /// Fixed amount off the product subtotal
    Fixed { amount: Decimal },

    /// Percentage of the product subtotal, expressed as 0..=100
    Percentage { percent: Decimal },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    code: String,
    discount: CouponDiscount,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    minimum_spend: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

impl Coupon {
    pub fn fixed(code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            code: code.into(),
            discount: CouponDiscount::Fixed { amount },
            minimum_spend: None,
            expires_at: None,
        }
    }

    pub fn percentage(code: impl Into<String>, percent: Decimal) -> Self {
        Self {
            code: code.into(),
            discount: CouponDiscount::Percentage { percent },
            minimum_spend: None,
            expires_at: None,
        }
    }

    pub fn with_minimum_spend(mut self, minimum: Decimal) -> Self {
        self.minimum_spend = Some(minimum);
        self
    }

    pub fn with_expiry(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Discount this coupon grants against the order's product subtotal.
    pub fn discount_for(&self, order: &Order) -> Decimal {
        match &self.discount {
            CouponDiscount::Fixed { amount } => *amount,
            CouponDiscount::Percentage { percent } => {
                order.product_subtotal() * *percent / Decimal::ONE_HUNDRED
            }
        }
    }

    /// Check the coupon applies to the order right now.
    pub fn validate(&self, order: &Order) -> Result<()> {
        if let Some(expires_at) = self.expires_at {
            if Utc::now() > expires_at {
                return Err(StoreError::invalid_coupon(&self.code, "coupon has expired"));
            }
        }

        if let Some(minimum) = self.minimum_spend {
            if order.product_subtotal() < minimum {
                return Err(StoreError::invalid_coupon(
                    &self.code,
                    format!("order does not reach the {minimum} minimum spend"),
                ));
            }
        }

        Ok(())
    }
}

impl From<&Coupon> for String {
    fn from(coupon: &Coupon) -> Self {
        coupon.code.clone()
    }
}
