use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use super::{GateConfig, GateDecision};

const SECURE_COOKIE_PREFIX: &str = "__Secure-";

pub async fn access_gate_middleware(
    State(gate): State<Arc<GateConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let has_cookie = has_session_cookie(request.headers(), &gate.session_cookie_name);

    match gate.decide(request.uri().path(), has_cookie) {
        GateDecision::Continue => next.run(request).await,
        GateDecision::RedirectTo(location) => {
            tracing::debug!("Gate: {} -> {}", request.uri().path(), location);
            Redirect::temporary(&location).into_response()
        }
    }
}

/// Whether a non-empty session cookie is present. Contents are not inspected.
pub fn has_session_cookie(headers: &HeaderMap, cookie_name: &str) -> bool {
    session_cookie_value(headers, cookie_name).is_some()
}

/// Value of the session cookie under its plain or `__Secure-` prefixed name.
pub fn session_cookie_value<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|&(name, value)| {
            let name = name.strip_prefix(SECURE_COOKIE_PREFIX).unwrap_or(name);
            name == cookie_name && !value.is_empty()
        })
        .map(|(_, value)| value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{HeaderValue, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use gymkit_types::SESSION_COOKIE_NAME;
    use tower::ServiceExt;

    fn app() -> Router {
        let gate = Arc::new(GateConfig::default());
        Router::new()
            .route("/routines", get(|| async { "routines" }))
            .route("/auth", get(|| async { "sign in" }))
            .layer(middleware::from_fn_with_state(gate, access_gate_middleware))
    }

    fn cookies(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_cookie_detection() {
        assert!(has_session_cookie(
            &cookies("theme=dark; better-auth.session_token=abc"),
            SESSION_COOKIE_NAME
        ));
        assert!(has_session_cookie(
            &cookies("__Secure-better-auth.session_token=abc"),
            SESSION_COOKIE_NAME
        ));
        assert!(!has_session_cookie(&cookies("better-auth.session_token="), SESSION_COOKIE_NAME));
        assert!(!has_session_cookie(&cookies("theme=dark"), SESSION_COOKIE_NAME));
        assert!(!has_session_cookie(&HeaderMap::new(), SESSION_COOKIE_NAME));
    }

    #[test]
    fn test_cookie_value_extraction() {
        let headers = cookies("a=1; better-auth.session_token=tok-9; b=2");
        assert_eq!(session_cookie_value(&headers, SESSION_COOKIE_NAME), Some("tok-9"));
    }

    #[tokio::test]
    async fn test_redirects_without_cookie() {
        let response = app()
            .oneshot(axum::http::Request::builder().uri("/routines").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/auth");
    }

    #[tokio::test]
    async fn test_passes_with_cookie() {
        let request = axum::http::Request::builder()
            .uri("/routines")
            .header(header::COOKIE, "better-auth.session_token=anything")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_sign_in_page_reachable_without_cookie() {
        let response = app()
            .oneshot(axum::http::Request::builder().uri("/auth").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
