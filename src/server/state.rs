//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::admission::{TaskReceiver, TaskRegistry};
use crate::core::authorization::AdminTokenAuthorizer;
use crate::core::batch::BatchOrchestrator;
use crate::core::maintenance::MaintenanceRegistry;
use crate::core::profile_cache::MokaProfileCache;
use crate::core::validators::DefaultValidator;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// The orchestrator holds the same collaborators as trait objects; the
/// concrete handles are kept here for health, admin and background tasks.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    pub orchestrator: Arc<BatchOrchestrator>,
    pub cache: Arc<MokaProfileCache>,
    pub registry: Arc<TaskRegistry>,
    pub maintenance: Arc<MaintenanceRegistry>,
    pub authorizer: Arc<AdminTokenAuthorizer>,
}

impl AppState {
    /// Wire the default collaborators from configuration.
    ///
    /// Returns the queue admitted tasks are pushed onto.
    pub fn new(config: Config) -> (Self, TaskReceiver) {
        let cache = Arc::new(MokaProfileCache::from_config(config.cache()));
        let (registry, receiver) = TaskRegistry::from_config(config.scraper());
        let registry = Arc::new(registry);
        let maintenance = Arc::new(MaintenanceRegistry::from_config(config.maintenance()));
        let authorizer = Arc::new(AdminTokenAuthorizer::from_config(config.auth()));

        let orchestrator = Arc::new(BatchOrchestrator::new(
            Arc::new(DefaultValidator),
            cache.clone(),
            registry.clone(),
            authorizer.clone(),
            maintenance.clone(),
        ));

        let state = Self {
            config: Arc::new(config),
            orchestrator,
            cache,
            registry,
            maintenance,
            authorizer,
        };
        (state, receiver)
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
