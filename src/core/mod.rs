//! Core search logic
//!
//! Validation, caching, task admission and the batch orchestrator that ties
//! them together. Nothing here knows about HTTP.

pub mod admission;
pub mod authorization;
pub mod batch;
pub mod dispatcher;
pub mod maintenance;
pub mod profile_cache;
pub mod types;
pub mod validators;

pub use admission::{AdmissionController, AdmissionOutcome, TaskRegistry};
pub use authorization::{AdminTokenAuthorizer, BypassAuthorizer};
pub use batch::{BatchOrchestrator, BatchSearchRequest, BatchSearchResponse, RequestContext};
pub use dispatcher::{HttpProfileFetcher, ProfileFetcher, TaskDispatcher};
pub use maintenance::{MaintenanceRegistry, MaintenanceStatus};
pub use profile_cache::{MokaProfileCache, ProfileCache};
pub use validators::{DefaultValidator, SearchValidator};
