//! # Gymkit Types
//!
//! Wire models and error definitions shared by the gymkit server and client.
//!
//! - **`error`** - The backend error envelope and the single `ApiError` kind
//! - **`models`** - Domain models (Routine, User, Session)
//!
//! ## Architecture Role
//!
//! `gymkit-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!                 gymkit-types (this crate)
//!                        │
//!          ┌─────────────┴─────────────┐
//!          ▼                           ▼
//!    gymkit-client                gymkit-core
//!          │                           │
//!          └─────────────┬─────────────┘
//!                        ▼
//!                  gymkit-server
//! ```

pub mod error;
pub mod models;

pub use error::{ApiError, BackendErrorEnvelope, ErrorPayload};
pub use models::{
    CreateRoutineRequest, Routine, SessionResponse, SignInRequest, SignUpRequest,
    UpdateRoutineRequest, User, SESSION_COOKIE_NAME,
};
