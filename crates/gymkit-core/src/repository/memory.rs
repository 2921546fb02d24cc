//! In-memory routine storage.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use gymkit_types::{CreateRoutineRequest, Routine, UpdateRoutineRequest};
use tokio::sync::RwLock;

use super::{validate_name, RepoResult, RepositoryError, RoutineRepository};

/// Name that makes creation fail when fault injection is on.
const FAILING_NAME: &str = "error";
/// Routine that cannot be deleted when fault injection is on.
const UNDELETABLE_ID: &str = "1";

/// Process-local routine store. Each instance owns its own list.
#[derive(Debug, Default)]
pub struct InMemoryRoutineRepository {
    routines: RwLock<Vec<Routine>>,
    fault_injection: bool,
}

impl InMemoryRoutineRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with the two development routines.
    pub fn with_seed() -> Self {
        let now = Utc::now();
        let mut leg_day = Routine::new(
            UNDELETABLE_ID.to_string(),
            "Leg Day".to_string(),
            Some("Leg day routine description".to_string()),
        );
        leg_day.last_done = now - Duration::days(3);
        leg_day.created_at = now - Duration::days(60);

        let mut upper_body = Routine::new(
            uuid::Uuid::new_v4().to_string(),
            "Upper Body".to_string(),
            Some("Upper body routine description".to_string()),
        );
        upper_body.last_done = now - Duration::days(1);
        upper_body.created_at = now - Duration::days(45);

        Self {
            routines: RwLock::new(vec![leg_day, upper_body]),
            fault_injection: false,
        }
    }

    /// Fail creating a routine named `error` and deleting routine `1`.
    pub fn with_fault_injection(mut self, enabled: bool) -> Self {
        self.fault_injection = enabled;
        self
    }
}

#[async_trait]
impl RoutineRepository for InMemoryRoutineRepository {
    async fn list_routines(&self) -> RepoResult<Vec<Routine>> {
        Ok(self.routines.read().await.clone())
    }

    async fn get_routine(&self, id: &str) -> RepoResult<Routine> {
        self.routines
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn create_routine(&self, input: CreateRoutineRequest) -> RepoResult<Routine> {
        if self.fault_injection && input.name == FAILING_NAME {
            tracing::debug!("Injected failure for routine name {:?}", input.name);
            return Err(RepositoryError::Mocked);
        }

        let name = validate_name(&input.name)?;
        let routine = Routine::new(uuid::Uuid::new_v4().to_string(), name, input.description);
        self.routines.write().await.push(routine.clone());
        tracing::info!("Created routine {} ({})", routine.id, routine.name);
        Ok(routine)
    }

    async fn update_routine(&self, id: &str, input: UpdateRoutineRequest) -> RepoResult<Routine> {
        let name = input.name.as_deref().map(validate_name).transpose()?;

        let mut routines = self.routines.write().await;
        let routine = routines
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        routine.apply(UpdateRoutineRequest { name, description: input.description });
        Ok(routine.clone())
    }

    async fn delete_routine(&self, id: &str) -> RepoResult<()> {
        if self.fault_injection && id == UNDELETABLE_ID {
            tracing::debug!("Injected failure deleting routine {}", id);
            return Err(RepositoryError::Mocked);
        }

        let mut routines = self.routines.write().await;
        let before = routines.len();
        routines.retain(|r| r.id != id);
        if routines.len() == before {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        tracing::info!("Deleted routine {}", id);
        Ok(())
    }
}
