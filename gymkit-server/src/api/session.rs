//! Per-request session check for protected handlers.
//!
//! The gate only looks for the cookie; this extractor validates it.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use gymkit_core::{session_cookie_value, AuthError};
use gymkit_types::SessionResponse;

use super::ApiFailure;
use crate::state::AppState;

pub struct CurrentSession(pub SessionResponse);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiFailure;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        session_cookie_value(&parts.headers, state.session_cookie_name())
            .and_then(|token| state.auth().session(token))
            .map(CurrentSession)
            .ok_or_else(|| AuthError::Unauthorized.into())
    }
}
