//! Test helpers for gymkit-server unit tests.

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue};
use axum_test::TestServer;
use gymkit_core::{AuthService, GateConfig, InMemoryRoutineRepository};
use gymkit_types::{SignUpRequest, SESSION_COOKIE_NAME};

use crate::router::build_router;
use crate::state::AppState;

/// State with the seeded, fault-injecting repository used in mock mode.
pub fn test_app_state() -> AppState {
    let repository = InMemoryRoutineRepository::with_seed().with_fault_injection(true);
    AppState::new_with_components(
        Arc::new(repository),
        Arc::new(AuthService::default()),
        GateConfig::default(),
    )
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state, "./does-not-exist")).expect("failed to start test server")
}

/// Register a member directly and return a `Cookie` header carrying the session.
pub fn session_cookie(state: &AppState) -> (HeaderName, HeaderValue) {
    let session = state
        .auth()
        .sign_up(SignUpRequest {
            name: "Test Member".to_string(),
            email: "member@example.com".to_string(),
            password: "correct horse".to_string(),
            callback_url: None,
        })
        .expect("failed to sign up test member");

    let value = HeaderValue::try_from(format!("{}={}", SESSION_COOKIE_NAME, session.token))
        .expect("invalid cookie header");
    (header::COOKIE, value)
}
