use serde::{Deserialize, Serialize};

/// Order status lifecycle. No transition graph is enforced at this layer;
/// transition legality, if any, is a policy concern of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Order created, awaiting payment
    Pending,

    /// Payment received, order being prepared
    Processing,

    /// Held for manual review or an offline payment
    OnHold,

    /// Fulfilled
    Completed,

    /// Cancelled before fulfilment
    Cancelled,

    /// Paid and subsequently refunded
    Refunded,

    /// Payment failed
    Failed,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::OnHold => write!(f, "on-hold"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
            OrderStatus::Refunded => write!(f, "refunded"),
            OrderStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "on-hold" => Ok(OrderStatus::OnHold),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "refunded" => Ok(OrderStatus::Refunded),
            "failed" => Ok(OrderStatus::Failed),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

/// One recorded status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub old_status: OrderStatus,
    pub new_status: OrderStatus,
    pub message: String,
}
