//! Application state shared across REST API handlers.

use crate::auth::AuthConfig;
use std::sync::Arc;
use wardline_core::{AccountService, AdmissionService, BedPool, Registry};

/// Contains the services needed by the REST API endpoints, all backed by
/// the same registry.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub pool: BedPool,
    pub admissions: AdmissionService,
    pub accounts: AccountService,
    pub auth: AuthConfig,
}

impl AppState {
    /// Wires every service to the given registry.
    pub fn new(registry: Arc<Registry>, auth: AuthConfig) -> Self {
        Self {
            pool: BedPool::new(registry.clone()),
            admissions: AdmissionService::new(registry.clone()),
            accounts: AccountService::new(registry.clone()),
            registry,
            auth,
        }
    }
}
