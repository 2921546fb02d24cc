//! Auth handlers: sign-up, sign-in, session, sign-out

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue},
    response::{AppendHeaders, IntoResponse, Json},
};
use chrono::Utc;
use gymkit_client::build_frontend_callback_url;
use gymkit_core::session_cookie_value;
use gymkit_types::{SessionResponse, SignInRequest, SignUpRequest};
use url::Url;

use super::ApiFailure;
use crate::state::AppState;

pub async fn sign_up(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiFailure> {
    let Json(mut request) = payload?;
    let callback = request.callback_url.take();
    let mut session = state.auth().sign_up(request)?;
    session.url = resolve_callback(&headers, callback);
    Ok(with_session_cookie(&state, session))
}

pub async fn sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiFailure> {
    let Json(mut request) = payload?;
    let callback = request.callback_url.take();
    let mut session = state.auth().sign_in(request)?;
    session.url = resolve_callback(&headers, callback);
    Ok(with_session_cookie(&state, session))
}

/// `callbackURL` joined onto the caller's `Origin`, when both are usable.
fn resolve_callback(headers: &HeaderMap, callback: Option<String>) -> Option<String> {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Url::parse(value).ok());
    callback.map(|path| build_frontend_callback_url(&path, origin.as_ref()))
}

/// `null` when there is no live session.
pub async fn get_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<Option<SessionResponse>> {
    let session = session_cookie_value(&headers, state.session_cookie_name())
        .and_then(|token| state.auth().session(token));
    Json(session)
}

pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_cookie_value(&headers, state.session_cookie_name()) {
        state.auth().sign_out(token);
    }

    let cleared = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        state.session_cookie_name()
    );
    (
        AppendHeaders(cookie_header(cleared)),
        Json(serde_json::json!({"success": true})),
    )
}

fn with_session_cookie(state: &AppState, session: SessionResponse) -> impl IntoResponse {
    let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        state.session_cookie_name(),
        session.token,
        max_age
    );
    (AppendHeaders(cookie_header(cookie)), Json(session))
}

fn cookie_header(cookie: String) -> Option<(header::HeaderName, HeaderValue)> {
    HeaderValue::try_from(cookie)
        .ok()
        .map(|value| (header::SET_COOKIE, value))
}
