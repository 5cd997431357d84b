//! Token endpoint.

use axum::{Form, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::services::AuthService;
use crate::state::AppState;

/// Form-encoded credentials, OAuth2 password-flow style.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// A freshly issued bearer token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Exchange credentials for a bearer token.
///
/// POST /token
///
/// # Errors
///
/// Returns 401 with a `WWW-Authenticate: Bearer` challenge on bad credentials.
pub async fn issue_token(
    State(state): State<AppState>,
    Form(form): Form<TokenRequest>,
) -> Result<Json<TokenResponse>> {
    let user = AuthService::new(state.pool())
        .login(&form.username, &form.password)
        .await?;

    let access_token = state.tokens().issue(&user.username)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
