//! Error types for the gymkit client.

use gymkit_types::ApiError;
use thiserror::Error;

/// Errors that can occur when using the gymkit client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The backend answered with a failure status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("Network error while {operation}: {message}")]
    Network {
        /// What the client was doing, e.g. "fetching routines".
        operation: &'static str,
        /// Transport error description.
        message: String,
    },

    /// A call that must return a value got an empty success body.
    #[error("Empty response while {0}")]
    EmptyResponse(&'static str),

    /// Client configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failed to build the underlying HTTP client.
    #[error("HTTP client setup failed: {0}")]
    Setup(#[from] reqwest::Error),
}

impl ClientError {
    /// The backend error, if this failure came from a response.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Reading a response body failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to read response body: {0}")]
pub struct BodyReadError(pub String);
