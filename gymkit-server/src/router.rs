use axum::{http::StatusCode, middleware, response::IntoResponse, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::api;
use crate::state::AppState;
use gymkit_core::access_gate_middleware;

pub fn build_router(state: AppState, static_dir: &str) -> Router {
    let gate = state.gate();

    let index_path = format!("{}/index.html", static_dir);
    let spa_service = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(&index_path));

    // Everything except health checks goes through the gate, including the
    // SPA fallback, so deep links to protected pages land on sign-in.
    let gated = Router::<AppState>::new()
        .nest("/api", api::router())
        .fallback_service(spa_service)
        .with_state(state)
        .layer(middleware::from_fn_with_state(gate, access_gate_middleware));

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check));

    public_routes
        .merge(gated)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(serde_json::json!({"status": "ok"})))
}
