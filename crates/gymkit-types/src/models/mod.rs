//! Domain models exchanged over the gymkit API.

mod routine;
mod user;

pub use routine::{CreateRoutineRequest, Routine, UpdateRoutineRequest};
pub use user::{SESSION_COOKIE_NAME, SessionResponse, SignInRequest, SignUpRequest, User};
