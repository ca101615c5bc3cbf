//! Session token verification - the identity provider adapter
//!
//! The storefront does not provision identities itself. An external
//! identity provider issues HS256 session tokens whose claims carry the
//! stable user id plus a display-name/avatar snapshot; this module only
//! verifies them with the shared secret from configuration.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by an identity-provider session token
///
/// Standard OIDC claim names: `sub` is the stable user id, `name` and
/// `picture` are the display snapshot the client may post alongside a
/// comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Stable user id assigned by the identity provider
    pub sub: String,
    /// Display name, if the provider supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar URL, if the provider supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Expiration (seconds since Unix epoch)
    pub exp: i64,
}

/// Verifies identity-provider session tokens
pub struct SessionVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    /// Create a verifier for tokens signed with the given shared secret
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verify signature and expiry, returning the session claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Invalid,
            })
    }
}

impl std::fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionVerifier").finish_non_exhaustive()
    }
}

/// Session token verification errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid session token")]
    Invalid,

    #[error("Session token expired")]
    Expired,
}
