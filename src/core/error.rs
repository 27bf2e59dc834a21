/// Application-wide Result type
pub type Result<T> = std::result::Result<T, StoreError>;

/// Main storefront error type
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// A line item lookup or update referenced a key the ledger does not hold
    #[error("Item '{0}' not found in order")]
    ItemNotFound(String),

    /// Quantity that cannot be applied to a line item
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Stock check failed; carries the quantity still available
    #[error("Not enough units in stock, only {available} available")]
    InsufficientStock { available: u32 },

    /// A coupon failed its application check
    #[error("Coupon '{code}' cannot be applied: {reason}")]
    InvalidCoupon { code: String, reason: String },

    /// Several coupons failed at once; messages are kept separate so the
    /// caller can present them individually
    #[error("Coupons cannot be applied: {}", .0.join("; "))]
    InvalidCoupons(Vec<String>),

    /// Shipping selection is incomplete or references an unknown method/rate
    #[error("Invalid shipping selection: {0}")]
    InvalidShippingSelection(String),

    /// Persisted order state holds a field whose shape is unusable
    #[error("Persisted state corrupt: {0}")]
    CorruptState(String),

    /// Shipping or payment method failure surfaced by the ledger
    #[error("Method error: {0}")]
    Method(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Helper functions for common error scenarios
impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        StoreError::Validation(msg.into())
    }

    pub fn item_not_found(key: impl Into<String>) -> Self {
        StoreError::ItemNotFound(key.into())
    }

    pub fn insufficient_stock(available: u32) -> Self {
        StoreError::InsufficientStock { available }
    }

    pub fn invalid_coupon(code: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::InvalidCoupon {
            code: code.into(),
            reason: reason.into(),
        }
    }

    pub fn shipping(msg: impl Into<String>) -> Self {
        StoreError::InvalidShippingSelection(msg.into())
    }

    pub fn corrupt_state(msg: impl Into<String>) -> Self {
        StoreError::CorruptState(msg.into())
    }

    pub fn method(msg: impl Into<String>) -> Self {
        StoreError::Method(msg.into())
    }
}
