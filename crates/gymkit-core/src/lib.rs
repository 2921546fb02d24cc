//! # Gymkit Core
//!
//! Server-side building blocks for gymkit:
//!
//! - **`gate`** - Per-navigation pass/redirect decision and its axum middleware
//! - **`repository`** - Routine storage abstraction and the in-memory backend
//! - **`auth`** - Email/password accounts and session tokens

pub mod auth;
pub mod gate;
pub mod repository;

pub use auth::{AuthError, AuthService};
pub use gate::{
    access_gate_middleware, has_session_cookie, session_cookie_value, GateConfig, GateDecision,
};
pub use repository::{InMemoryRoutineRepository, RepoResult, RepositoryError, RoutineRepository};
