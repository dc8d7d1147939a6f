//! Aggregates module
pub mod order;
pub mod cart;

pub use order::{Order, OrderError, OrderStatus};
pub use cart::{Cart, CartError, CartItem};
