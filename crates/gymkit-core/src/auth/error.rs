//! Authentication errors.

use gymkit_types::ApiError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("A user with this email already exists")]
    UserAlreadyExists,

    #[error("Invalid input: {0}")]
    Validation(String),

    /// No live session for the presented token.
    #[error("Sign in required")]
    Unauthorized,

    /// Hashing or verifying a password failed.
    #[error("Credential processing failed: {0}")]
    Crypto(String),
}

impl AuthError {
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials | Self::Unauthorized => 401,
            Self::UserAlreadyExists => 409,
            Self::Validation(_) => 422,
            Self::Crypto(_) => 500,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Crypto(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        ApiError::new(self.to_string(), self.http_status_code(), self.error_type(), None)
    }
}
