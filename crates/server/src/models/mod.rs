//! Domain types.
//!
//! These are the validated in-memory shapes of the persisted entities. They
//! double as API response bodies; nothing in here ever carries a password hash.

pub mod order;
pub mod product;
pub mod user;

pub use order::{Order, OrderItem};
pub use product::Product;
pub use user::User;
