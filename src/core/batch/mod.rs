//! Batch adventurer search

mod orchestrator;
mod types;


pub use orchestrator::{BatchOrchestrator, BatchPlan, RequestContext, Stage};
pub use types::{
    BatchSearchRequest, BatchSearchResponse, BatchStats, ItemOutcome, ItemStatus, MAX_BATCH_SIZE,
};
