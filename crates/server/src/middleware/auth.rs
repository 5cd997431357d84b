//! Bearer-token authentication extractor.
//!
//! Handlers that need the acting identity take a [`CurrentUser`] parameter.
//! Extraction verifies the token signature and expiry, then resolves the
//! subject to an active user row; any failure is a 401 with a
//! `WWW-Authenticate: Bearer` challenge.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::services::{TokenError, TokenService};
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser(user): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| TokenError::Invalid("missing Authorization header".to_owned()))?;

        let token = TokenService::extract_from_header(header_value)
            .ok_or_else(|| TokenError::Invalid("expected Bearer scheme".to_owned()))?;

        let claims = state.tokens().verify(token)?;

        // A verified token is still useless if its subject has been
        // deactivated or removed since issuance.
        let user = UserRepository::new(state.pool())
            .get_by_username(&claims.sub)
            .await?
            .filter(|u| u.is_active)
            .ok_or(TokenError::UnknownSubject)?;

        Ok(Self(user))
    }
}
