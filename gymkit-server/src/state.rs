//! Application State
//!
//! Holds the routine repository, the auth service and the gate settings.

use std::sync::Arc;

use gymkit_core::{AuthService, GateConfig, InMemoryRoutineRepository, RoutineRepository};

use crate::cli::ServeArgs;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub repository: Arc<dyn RoutineRepository>,
    pub auth: Arc<AuthService>,
    pub gate: Arc<GateConfig>,
}

impl AppState {
    pub fn new_with_components(
        repository: Arc<dyn RoutineRepository>,
        auth: Arc<AuthService>,
        gate: GateConfig,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                repository,
                auth,
                gate: Arc::new(gate),
            }),
        }
    }

    /// State for `serve`: in-memory storage, seeded and fault-injecting in mock mode.
    pub fn from_args(args: &ServeArgs) -> Self {
        let repository = if args.mock {
            tracing::info!("Mock mode: seeded routines, injected failures enabled");
            InMemoryRoutineRepository::with_seed().with_fault_injection(true)
        } else {
            InMemoryRoutineRepository::new()
        };

        let gate = GateConfig {
            sign_in_path: args.sign_in_path.clone(),
            auth_api_prefix: args.auth_api_prefix.clone(),
            asset_prefix: args.asset_prefix.clone(),
            ..GateConfig::default()
        };

        Self::new_with_components(Arc::new(repository), Arc::new(AuthService::default()), gate)
    }

    pub fn repository(&self) -> &dyn RoutineRepository {
        self.inner.repository.as_ref()
    }

    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    pub fn gate(&self) -> Arc<GateConfig> {
        Arc::clone(&self.inner.gate)
    }

    pub fn session_cookie_name(&self) -> &str {
        &self.inner.gate.session_cookie_name
    }
}
