//! User endpoints.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::User;
use crate::services::AuthService;
use crate::state::AppState;

/// Registration request body. The plaintext password never outlives this
/// request.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Register a new user.
///
/// POST /users/
///
/// # Errors
///
/// Returns 400 if the username is already registered or the email is invalid.
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<User>> {
    let user = AuthService::new(state.pool())
        .register(&req.username, &req.email, &req.password)
        .await?;

    Ok(Json(user))
}

/// Return the authenticated user.
///
/// GET /users/me/
#[allow(clippy::unused_async)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}
