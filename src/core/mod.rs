pub mod error;
pub mod hooks;

pub use error::{Result, StoreError};
pub use hooks::{ActionChain, FilterChain};
