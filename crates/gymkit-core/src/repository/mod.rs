//! Routine repository trait for storage abstraction.

mod memory;

pub use memory::InMemoryRoutineRepository;

use async_trait::async_trait;
use gymkit_types::{ApiError, CreateRoutineRequest, Routine, UpdateRoutineRequest};

/// Injected failures reproduce the development mock backend.
pub const MOCKED_STATUS_CODE: u16 = 555;
pub const MOCKED_ERROR_TYPE: &str = "MOCKED_ERROR";
pub const MOCKED_ERROR_MESSAGE: &str = "Mocked error message";

pub type RepoResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Routine not found: {0}")]
    NotFound(String),
    #[error("Invalid routine: {0}")]
    Validation(String),
    #[error("Mocked error message")]
    Mocked,
}

impl RepositoryError {
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 422,
            Self::Mocked => MOCKED_STATUS_CODE,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Mocked => MOCKED_ERROR_TYPE,
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        ApiError::new(self.to_string(), self.http_status_code(), self.error_type(), None)
    }
}

#[async_trait]
pub trait RoutineRepository: Send + Sync {
    async fn list_routines(&self) -> RepoResult<Vec<Routine>>;
    async fn get_routine(&self, id: &str) -> RepoResult<Routine>;
    async fn create_routine(&self, input: CreateRoutineRequest) -> RepoResult<Routine>;
    async fn update_routine(&self, id: &str, input: UpdateRoutineRequest) -> RepoResult<Routine>;
    async fn delete_routine(&self, id: &str) -> RepoResult<()>;
}

/// Trimmed name, rejecting blanks.
pub(crate) fn validate_name(name: &str) -> RepoResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RepositoryError::Validation("name must not be blank".to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mocked_error_maps_to_envelope_fields() {
        let err = RepositoryError::Mocked.to_api_error();
        assert_eq!(err.status_code, 555);
        assert_eq!(err.error_type, "MOCKED_ERROR");
        assert_eq!(err.message, "Mocked error message");
    }

    #[test]
    fn test_every_error_maps_to_a_status() {
        let cases = [
            (RepositoryError::NotFound("9".to_string()), 404, "NOT_FOUND"),
            (RepositoryError::Validation("blank".to_string()), 422, "VALIDATION_ERROR"),
            (RepositoryError::Mocked, 555, "MOCKED_ERROR"),
        ];
        for (err, status, error_type) in cases {
            assert_eq!(err.http_status_code(), status);
            assert_eq!(err.error_type(), error_type);
        }
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Leg Day ").as_deref(), Ok("Leg Day"));
        assert!(matches!(validate_name("   "), Err(RepositoryError::Validation(_))));
    }
}
