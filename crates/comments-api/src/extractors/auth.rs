//! Session-token extractor for authenticated routes

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tracing::warn;

use crate::response::ApiError;
use crate::state::AppState;

/// Identity established by a verified bearer token
///
/// `user_id` is what ownership checks compare against. The display
/// fields are whatever the identity provider stamped into the token at
/// sign-in; a request body may still override them.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let verifier_state = AppState::from_ref(state);
        let claims = verifier_state
            .session_verifier()
            .verify(bearer.token())
            .map_err(|e| {
                warn!(error = %e, "rejected session token");
                ApiError::InvalidAuthFormat
            })?;

        Ok(Self {
            user_id: claims.sub,
            display_name: claims.name,
            avatar_url: claims.picture,
        })
    }
}
