//! Backend error envelope and its discrimination from arbitrary JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiError;

/// Structured error body produced by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackendErrorEnvelope {
    pub status_code: u16,
    pub error_type: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

const REQUIRED_FIELDS: [&str; 3] = ["statusCode", "errorType", "message"];

/// A decoded JSON error body: either the backend envelope or anything else.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    Structured(BackendErrorEnvelope),
    Raw(Value),
}

impl ErrorPayload {
    /// Parse-and-validate a decoded body.
    ///
    /// Any object carrying all three required fields is `Structured`; every
    /// other value stays `Raw`. Field values are read leniently: `statusCode`
    /// may be an integral float or a numeric string and falls back to
    /// `http_status` when unusable, non-string `errorType`/`message` are
    /// rendered as JSON text, and `details: null` counts as absent.
    pub fn classify(value: Value, http_status: u16) -> Self {
        let mut obj = match value {
            Value::Object(obj) if REQUIRED_FIELDS.iter().all(|field| obj.contains_key(*field)) => obj,
            other => return Self::Raw(other),
        };

        let status_code = obj
            .get("statusCode")
            .and_then(lenient_status_code)
            .unwrap_or(http_status);

        Self::Structured(BackendErrorEnvelope {
            status_code,
            error_type: obj.remove("errorType").map(text_field).unwrap_or_default(),
            message: obj.remove("message").map(text_field).unwrap_or_default(),
            details: obj.remove("details").filter(|details| !details.is_null()),
        })
    }

    /// Turn the payload into an error, using the status line only for `Raw`.
    pub fn into_api_error(self, fallback_message: &str, status: u16, status_text: &str) -> ApiError {
        match self {
            Self::Structured(envelope) => envelope.into(),
            Self::Raw(value) => ApiError::from_status(fallback_message, status, status_text, value),
        }
    }
}

/// `555`, `555.0` and `"555"` all read as 555. Out-of-range or fractional
/// values are unusable.
fn lenient_status_code(value: &Value) -> Option<u16> {
    let code = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u16::MAX))
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u16::try_from(code).ok()
}

fn text_field(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
