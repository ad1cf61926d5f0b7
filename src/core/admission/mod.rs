//! Scrape task admission
//!
//! Decides whether a search may start a new scrape task. Admitted tasks are
//! queued for the pipeline; duplicates of an in-flight search are reported as
//! pending; anything past the per-client or global ceiling is refused.

mod registry;
mod types;


pub use registry::TaskRegistry;
pub use types::{AdmissionOutcome, RegistryStats, SearchTask, TaskLimits, TaskReceiver};

use crate::core::types::SearchKey;
use async_trait::async_trait;

/// Admission decision point consumed by the batch orchestrator
#[async_trait]
pub trait AdmissionController: Send + Sync {
    async fn try_admit(&self, client_id: &str, key: &SearchKey) -> AdmissionOutcome;
}
