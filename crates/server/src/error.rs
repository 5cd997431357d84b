//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. Response bodies are JSON `{"detail": "..."}`.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AuthError, OrderError, TokenError};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Registration or login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Bearer token was missing, invalid, or expired.
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Order workflow failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body, shaped like the frontend already expects.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::DuplicateUsername | AuthError::InvalidEmail(_) => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::PasswordHash | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Token(_) => StatusCode::UNAUTHORIZED,
            Self::Order(err) => match err {
                OrderError::EmptyOrder | OrderError::InvalidQuantity(_) => StatusCode::BAD_REQUEST,
                OrderError::ProductNotFound(_) => StatusCode::NOT_FOUND,
                OrderError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message. Internal details stay in the logs.
    fn detail(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Incorrect username or password".to_string(),
                AuthError::DuplicateUsername => "Username already registered".to_string(),
                AuthError::InvalidEmail(e) => e.to_string(),
                AuthError::PasswordHash | AuthError::Repository(_) => {
                    "Internal server error".to_string()
                }
            },
            Self::Token(_) => "Could not validate credentials".to_string(),
            Self::Order(err) => match err {
                OrderError::ProductNotFound(_) => "Product not found".to_string(),
                OrderError::Repository(_) => "Internal server error".to_string(),
                other => other.to_string(),
            },
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = Json(ErrorBody {
            detail: self.detail(),
        });

        // Challenge header on every 401, per RFC 6750
        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }

        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    use roastery_core::ProductId;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::DuplicateUsername)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Token(TokenError::Expired)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Order(OrderError::ProductNotFound(
                ProductId::new(99)
            ))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Order(OrderError::EmptyOrder)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::BadRequest("nope".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_carries_challenge_header() {
        let response = AppError::Token(TokenError::Expired).into_response();
        assert_eq!(
            response
                .headers()
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
    }

    #[test]
    fn test_internal_detail_is_generic() {
        let err = AppError::Internal("connection pool exhausted at 10.0.0.3".to_string());
        assert_eq!(err.detail(), "Internal server error");
    }

    #[test]
    fn test_order_repository_error_is_hidden() {
        let err = AppError::Order(OrderError::Repository(RepositoryError::NotFound));
        assert_eq!(get_status(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
