//! Response normalization.
//!
//! Turns any HTTP response into `Ok(Option<T>)` or a single [`ApiError`].
//! Bodies are single-read: [`ResponseSource::text`] consumes the response,
//! and every branch works on the captured text.

use async_trait::async_trait;
use gymkit_types::{ApiError, ErrorPayload};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::BodyReadError;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Anything that looks like an HTTP response with a once-readable body.
#[async_trait]
pub trait ResponseSource: Send + Sized {
    fn status(&self) -> u16;

    /// Reason phrase for the status, empty when unknown. Errors built from an
    /// empty reason phrase use `HTTP <status>` instead.
    fn status_text(&self) -> &str;

    /// Header lookup, case-insensitive.
    fn header(&self, name: &str) -> Option<&str>;

    /// Read the whole body as text. Consumes the response.
    async fn text(self) -> Result<String, BodyReadError>;
}

#[async_trait]
impl ResponseSource for reqwest::Response {
    fn status(&self) -> u16 {
        reqwest::Response::status(self).as_u16()
    }

    fn status_text(&self) -> &str {
        reqwest::Response::status(self).canonical_reason().unwrap_or("")
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|v| v.to_str().ok())
    }

    async fn text(self) -> Result<String, BodyReadError> {
        reqwest::Response::text(self)
            .await
            .map_err(|e| BodyReadError(e.to_string()))
    }
}

/// A response already held in memory.
#[derive(Debug, Clone)]
pub struct BufferedResponse {
    status: u16,
    status_text: String,
    headers: HashMap<String, String>,
    body: Result<String, BodyReadError>,
}

impl BufferedResponse {
    /// Empty-bodied response with the canonical reason phrase for `status`.
    pub fn new(status: u16) -> Self {
        let status_text = StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("")
            .to_string();
        Self {
            status,
            status_text,
            headers: HashMap::new(),
            body: Ok(String::new()),
        }
    }

    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Ok(body.into());
        self
    }

    /// JSON body with a matching `content-type`.
    pub fn with_json(self, value: &Value) -> Self {
        self.with_header(CONTENT_TYPE.as_str(), JSON_MEDIA_TYPE)
            .with_body(value.to_string())
    }

    /// Make the body read fail, as a dropped connection would.
    pub fn with_unreadable_body(mut self, reason: impl Into<String>) -> Self {
        self.body = Err(BodyReadError(reason.into()));
        self
    }
}

#[async_trait]
impl ResponseSource for BufferedResponse {
    fn status(&self) -> u16 {
        self.status
    }

    fn status_text(&self) -> &str {
        &self.status_text
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    async fn text(self) -> Result<String, BodyReadError> {
        self.body
    }
}

/// Normalize a response.
///
/// Failure statuses always yield `Err(ApiError)`. Success statuses never
/// fail: `204`, `content-length: 0`, blank bodies, unreadable bodies and
/// bodies that do not decode as `T` all resolve to `Ok(None)`.
pub async fn handle_response<T, R>(response: R, fallback_message: &str) -> Result<Option<T>, ApiError>
where
    T: DeserializeOwned,
    R: ResponseSource,
{
    let status = response.status();

    if !(200..300).contains(&status) {
        return Err(failure_to_error(response, fallback_message).await);
    }

    if status == StatusCode::NO_CONTENT.as_u16()
        || response.header(CONTENT_LENGTH.as_str()) == Some("0")
    {
        return Ok(None);
    }

    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("Treating unreadable {} body as empty: {}", status, e);
            return Ok(None);
        }
    };

    if text.trim().is_empty() {
        return Ok(None);
    }

    // Lenient by policy: a malformed success body is not an error here.
    match serde_json::from_str(&text) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::debug!("Treating undecodable {} body as empty: {}", status, e);
            Ok(None)
        }
    }
}

async fn failure_to_error<R: ResponseSource>(response: R, fallback_message: &str) -> ApiError {
    let status = response.status();
    let status_text = match response.status_text() {
        "" => format!("HTTP {status}"),
        text => text.to_string(),
    };
    let is_json = response
        .header(CONTENT_TYPE.as_str())
        .is_some_and(|ct| ct.contains(JSON_MEDIA_TYPE));

    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Failed to read {} error body: {}", status, e);
            let details = Value::String(status_text.clone());
            return ApiError::from_status(fallback_message, status, &status_text, details);
        }
    };

    if is_json && !text.trim().is_empty() {
        return match serde_json::from_str::<Value>(&text) {
            Ok(value) => {
                ErrorPayload::classify(value, status).into_api_error(fallback_message, status, &status_text)
            }
            Err(_) => {
                ApiError::from_status(fallback_message, status, &status_text, Value::String(text))
            }
        };
    }

    let details = if text.is_empty() { status_text.clone() } else { text };
    ApiError::from_status(fallback_message, status, &status_text, Value::String(details))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    const FALLBACK: &str = "Failed to fetch routines";

    async fn normalize(response: BufferedResponse) -> Result<Option<Value>, ApiError> {
        handle_response::<Value, _>(response, FALLBACK).await
    }

    #[tokio::test]
    async fn test_no_content_ignores_body() {
        let response = BufferedResponse::new(204).with_json(&json!({"ignored": true}));
        assert_eq!(normalize(response).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_zero_content_length_ignores_body() {
        let response = BufferedResponse::new(200)
            .with_header("Content-Length", "0")
            .with_body("[1, 2, 3]");
        assert_eq!(normalize(response).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blank_success_body_is_empty() {
        let response = BufferedResponse::new(200).with_body("  \n ");
        assert_eq!(normalize(response).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_success_body_is_decoded() {
        let response = BufferedResponse::new(200).with_json(&json!([{"id": "1"}]));
        assert_eq!(normalize(response).await.unwrap(), Some(json!([{"id": "1"}])));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_empty() {
        let response = BufferedResponse::new(200).with_body("{not json");
        assert_eq!(normalize(response).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_success_body_of_wrong_shape_is_empty() {
        let response = BufferedResponse::new(200).with_json(&json!({"id": 1}));
        let result = handle_response::<Vec<String>, _>(response, FALLBACK).await;
        assert_eq!(result.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreadable_success_body_is_empty() {
        let response = BufferedResponse::new(200).with_unreadable_body("reset by peer");
        assert_eq!(normalize(response).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_envelope_is_surfaced_verbatim() {
        let response = BufferedResponse::new(555).with_json(&json!({
            "statusCode": 555,
            "errorType": "MOCKED_ERROR",
            "message": "Mocked error message"
        }));

        let err = normalize(response).await.unwrap_err();
        assert_eq!(err.message, "Mocked error message");
        assert_eq!(err.status_code, 555);
        assert_eq!(err.error_type, "MOCKED_ERROR");
        assert_eq!(err.details, None);
    }

    #[tokio::test]
    async fn test_envelope_status_code_wins_over_http_status() {
        let response = BufferedResponse::new(500).with_json(&json!({
            "statusCode": 409,
            "errorType": "CONFLICT",
            "message": "Already exists",
            "details": {"field": "name"}
        }));

        let err = normalize(response).await.unwrap_err();
        assert_eq!(err.status_code, 409);
        assert_eq!(err.details, Some(json!({"field": "name"})));
    }

    #[tokio::test]
    async fn test_foreign_json_becomes_details() {
        let response = BufferedResponse::new(400).with_json(&json!({"error": "bad"}));

        let err = normalize(response).await.unwrap_err();
        assert_eq!(err.message, FALLBACK);
        assert_eq!(err.status_code, 400);
        assert_eq!(err.error_type, "Bad Request");
        assert_eq!(err.details, Some(json!({"error": "bad"})));
    }

    #[tokio::test]
    async fn test_malformed_json_error_keeps_raw_text() {
        let response = BufferedResponse::new(502)
            .with_header("content-type", "application/json; charset=utf-8")
            .with_body("{\"statusCode\":");

        let err = normalize(response).await.unwrap_err();
        assert_eq!(err.message, FALLBACK);
        assert_eq!(err.error_type, "Bad Gateway");
        assert_eq!(err.details, Some(json!("{\"statusCode\":")));
    }

    #[tokio::test]
    async fn test_plain_text_error_keeps_text() {
        let response = BufferedResponse::new(503)
            .with_header("content-type", "text/plain")
            .with_body("maintenance");

        let err = normalize(response).await.unwrap_err();
        assert_eq!(err.message, FALLBACK);
        assert_eq!(err.status_code, 503);
        assert_eq!(err.details, Some(json!("maintenance")));
    }

    #[tokio::test]
    async fn test_envelope_shaped_text_without_json_type_is_not_parsed() {
        let body = r#"{"statusCode":418,"errorType":"TEAPOT","message":"short and stout"}"#;
        let response = BufferedResponse::new(418).with_body(body);

        let err = normalize(response).await.unwrap_err();
        assert_eq!(err.message, FALLBACK);
        assert_eq!(err.details, Some(json!(body)));
    }

    #[tokio::test]
    async fn test_empty_error_body_uses_status_text() {
        let response = BufferedResponse::new(404).with_header("content-type", "application/json");

        let err = normalize(response).await.unwrap_err();
        assert_eq!(err.error_type, "Not Found");
        assert_eq!(err.details, Some(json!("Not Found")));
    }

    #[tokio::test]
    async fn test_unreadable_error_body_uses_status_text() {
        let response = BufferedResponse::new(500)
            .with_status_text("Server Exploded")
            .with_unreadable_body("connection closed");

        let err = normalize(response).await.unwrap_err();
        assert_eq!(err.message, FALLBACK);
        assert_eq!(err.error_type, "Server Exploded");
        assert_eq!(err.details, Some(json!("Server Exploded")));
    }

    #[tokio::test]
    async fn test_non_standard_status_without_envelope_gets_error_type() {
        let response = BufferedResponse::new(555)
            .with_header("content-type", "text/plain")
            .with_body("mock backend exploded");

        let err = normalize(response).await.unwrap_err();
        assert_eq!(err.message, FALLBACK);
        assert_eq!(err.status_code, 555);
        assert_eq!(err.error_type, "HTTP 555");
        assert_eq!(err.details, Some(json!("mock backend exploded")));
    }

    #[tokio::test]
    async fn test_non_standard_status_with_empty_body_gets_error_type() {
        let err = normalize(BufferedResponse::new(599)).await.unwrap_err();
        assert_eq!(err.error_type, "HTTP 599");
        assert_eq!(err.details, Some(json!("HTTP 599")));
    }

    #[tokio::test]
    async fn test_float_status_code_envelope_keeps_backend_message() {
        let response = BufferedResponse::new(555).with_json(&json!({
            "statusCode": 555.0,
            "errorType": "MOCKED_ERROR",
            "message": "Mocked error message"
        }));

        let err = normalize(response).await.unwrap_err();
        assert_eq!(err.message, "Mocked error message");
        assert_eq!(err.status_code, 555);
        assert_eq!(err.error_type, "MOCKED_ERROR");
    }

    #[tokio::test]
    async fn test_string_status_code_envelope_keeps_backend_message() {
        let response = BufferedResponse::new(400).with_json(&json!({
            "statusCode": "400",
            "errorType": "BAD_INPUT",
            "message": "Backend message"
        }));

        let err = normalize(response).await.unwrap_err();
        assert_eq!(err.message, "Backend message");
        assert_eq!(err.status_code, 400);
        assert_eq!(err.error_type, "BAD_INPUT");
    }

    #[tokio::test]
    async fn test_identical_responses_yield_equal_results() {
        let make = || BufferedResponse::new(400).with_body("nope");
        assert_eq!(normalize(make()).await, normalize(make()).await);
    }
}
