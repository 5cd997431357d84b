//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs bound to a username with a fixed expiry window. The
//! signing key is injected from configuration, never embedded, so it can be
//! rotated by restarting with a new secret.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username (subject).
    pub sub: String,
    /// Issued-at timestamp.
    pub iat: i64,
    /// Expiry timestamp.
    pub exp: i64,
}

/// Token errors.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token's expiry window has passed.
    #[error("token expired")]
    Expired,

    /// Malformed, mis-signed, or otherwise unverifiable token.
    #[error("invalid token: {0}")]
    Invalid(String),

    /// The token verified but its subject no longer resolves to an active user.
    #[error("token subject is unknown or inactive")]
    UnknownSubject,

    /// Signing failed.
    #[error("token generation failed: {0}")]
    Generation(String),
}

/// Issues and verifies bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_minutes: i64,
}

impl TokenService {
    /// Create a token service from the configured signing secret and expiry.
    #[must_use]
    pub fn new(secret: &SecretString, expiry_minutes: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            expiry_minutes,
        }
    }

    /// Issue a signed bearer token for `username`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Generation` if signing fails.
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires = now + Duration::minutes(self.expiry_minutes);

        let claims = Claims {
            sub: username.to_owned(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Expiry is checked with zero leeway: a token is either inside its window
    /// or it is rejected.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` for tokens past their expiry window and
    /// `TokenError::Invalid` for anything malformed or mis-signed.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);

        let data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?;

        Ok(data.claims)
    }

    /// Strip the `Bearer ` scheme from an Authorization header value.
    #[must_use]
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_secret() -> SecretString {
        SecretString::from("kQ9$mN2@xR7!vB4#wJ8&zL1*pT6^cF3%")
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let service = TokenService::new(&test_secret(), 30);

        let token = service.issue("alice").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_fails() {
        // Negative expiry: the token is already past its window when issued.
        let service = TokenService::new(&test_secret(), -5);

        let token = service.issue("alice").unwrap();
        assert!(matches!(service.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_foreign_signature_fails() {
        let issuer = TokenService::new(&test_secret(), 30);
        let verifier = TokenService::new(
            &SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%"),
            30,
        );

        let token = issuer.issue("alice").unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_token_fails() {
        let service = TokenService::new(&test_secret(), 30);
        assert!(matches!(
            service.verify("not-a-jwt"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_tampered_token_fails() {
        let service = TokenService::new(&test_secret(), 30);
        let token = service.issue("alice").unwrap();

        // Flip a character in the payload segment.
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let payload = parts.get_mut(1).unwrap();
        let replacement = if payload.ends_with('A') { "B" } else { "A" };
        payload.replace_range(payload.len() - 1.., replacement);
        let tampered = parts.join(".");

        assert!(service.verify(&tampered).is_err());
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(
            TokenService::extract_from_header("Bearer abc.def.ghi"),
            Some("abc.def.ghi")
        );
        assert_eq!(TokenService::extract_from_header("Basic dXNlcg=="), None);
    }
}
