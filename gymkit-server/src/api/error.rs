use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use gymkit_core::{AuthError, RepositoryError};
use gymkit_types::ApiError;

/// An [`ApiError`] on its way out, serialized as the error envelope.
#[derive(Debug)]
pub struct ApiFailure(pub ApiError);

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::warn!("API error {}: {}", self.0.status_code, self.0.message);
        }
        (status, Json(self.0.to_envelope())).into_response()
    }
}

impl From<RepositoryError> for ApiFailure {
    fn from(err: RepositoryError) -> Self {
        Self(err.to_api_error())
    }
}

impl From<AuthError> for ApiFailure {
    fn from(err: AuthError) -> Self {
        Self(err.to_api_error())
    }
}

impl From<JsonRejection> for ApiFailure {
    fn from(rejection: JsonRejection) -> Self {
        Self(ApiError::new(
            rejection.body_text(),
            rejection.status().as_u16(),
            "INVALID_BODY",
            None,
        ))
    }
}
