//! Business logic services.
//!
//! Services sit between the HTTP handlers and the repositories: they validate
//! input, apply domain rules, and fold repository errors into domain errors.

pub mod auth;
pub mod orders;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use orders::{OrderError, OrderService};
pub use token::{Claims, TokenError, TokenService};
