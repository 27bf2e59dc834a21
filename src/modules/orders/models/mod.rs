pub mod item;
pub mod order;
pub mod state;
pub mod status;

pub use item::OrderItem;
pub use order::{Cart, Order};
pub use state::{OrderState, ShippingState};
pub use status::{OrderStatus, StatusChange};
