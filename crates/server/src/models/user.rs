//! User domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use roastery_core::{Email, UserId};

/// A registered account.
///
/// The password hash lives only in the `users` table and the credential-store
/// query paths; it is never part of this type, so it cannot leak into a
/// response body.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique, immutable login name.
    pub username: String,
    /// Contact email address.
    pub email: Email,
    /// Inactive users cannot authenticate or resolve tokens.
    pub is_active: bool,
    /// Administrative flag (not consulted by any in-scope operation).
    pub is_admin: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
