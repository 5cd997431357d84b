//! Authentication error type.

use thiserror::Error;

use roastery_core::EmailError;

use crate::db::RepositoryError;

/// Errors from registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or password mismatch. Deliberately a single variant so
    /// the two cases are indistinguishable to a caller.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The requested username is already registered.
    #[error("username already registered")]
    DuplicateUsername,

    /// The registration email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Hashing the password failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// The underlying repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
