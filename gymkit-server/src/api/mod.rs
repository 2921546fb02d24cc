//! API Routes
//!
//! Routines CRUD and the email/password auth endpoints. Every failure is
//! written as the backend error envelope.

mod auth;
mod error;
mod routines;
mod session;


pub use error::ApiFailure;
pub use session::CurrentSession;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use gymkit_types::ApiError;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Routines
        .route(
            "/routines",
            get(routines::list_routines).post(routines::create_routine),
        )
        .route(
            "/routines/:slug",
            get(routines::get_routine)
                .patch(routines::update_routine)
                .delete(routines::delete_routine),
        )
        // Auth (bypasses the gate)
        .route("/auth/sign-up/email", post(auth::sign_up))
        .route("/auth/sign-in/email", post(auth::sign_in))
        .route("/auth/get-session", get(auth::get_session))
        .route("/auth/sign-out", post(auth::sign_out))
        // API fallback: return 404 for unknown API endpoints
        .fallback(api_not_found)
}

async fn api_not_found() -> impl IntoResponse {
    ApiFailure(ApiError::new("Not found", 404, "NOT_FOUND", None))
}
