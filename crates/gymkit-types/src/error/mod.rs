//! Error taxonomy for the gymkit API.
//!
//! The backend reports failures with a JSON envelope
//! (`statusCode`, `errorType`, `message`, optional `details`). Clients turn
//! every failed response into exactly one error kind, [`ApiError`], whether or
//! not the body carried that envelope.

mod envelope;

pub use envelope::{BackendErrorEnvelope, ErrorPayload};

use serde_json::Value;
use thiserror::Error;

/// The single error kind raised by response normalization.
///
/// `status_code` and `error_type` come from the envelope when the backend
/// supplied one, otherwise from the HTTP status code and its reason phrase.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable message
    pub message: String,
    /// Backend status code or HTTP status
    pub status_code: u16,
    /// Backend error type or HTTP status text
    pub error_type: String,
    /// Envelope details, raw JSON body, or raw text
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(
        message: impl Into<String>,
        status_code: u16,
        error_type: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        Self {
            message: message.into(),
            status_code,
            error_type: error_type.into(),
            details,
        }
    }

    /// Build an error from the HTTP status line when the body had no envelope.
    pub fn from_status(
        fallback_message: &str,
        status_code: u16,
        status_text: &str,
        details: Value,
    ) -> Self {
        Self::new(fallback_message, status_code, status_text, Some(details))
    }

    /// Wire form of this error, as the server writes it.
    pub fn to_envelope(&self) -> BackendErrorEnvelope {
        BackendErrorEnvelope {
            status_code: self.status_code,
            error_type: self.error_type.clone(),
            message: self.message.clone(),
            details: self.details.clone(),
        }
    }
}

impl From<BackendErrorEnvelope> for ApiError {
    fn from(envelope: BackendErrorEnvelope) -> Self {
        Self {
            message: envelope.message,
            status_code: envelope.status_code,
            error_type: envelope.error_type,
            details: envelope.details,
        }
    }
}
