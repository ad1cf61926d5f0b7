//! Admission types and data structures

use crate::core::types::SearchKey;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Result of asking to start a search task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// A new task was admitted and queued
    Started,
    /// A task for the same key is already in flight
    Pending,
    /// The client or global ceiling on in-flight tasks is reached
    CeilingExceeded,
}

/// A search task handed to the scrape pipeline
#[derive(Debug, Clone)]
pub struct SearchTask {
    pub id: Uuid,
    pub client_id: String,
    pub key: SearchKey,
    pub admitted_at: DateTime<Utc>,
}

/// Receiving end of the admitted task queue
pub type TaskReceiver = mpsc::UnboundedReceiver<SearchTask>;

/// Ceilings and expiry applied by the registry
#[derive(Debug, Clone, Copy)]
pub struct TaskLimits {
    pub max_total: usize,
    pub max_per_client: usize,
    pub task_timeout: Duration,
}

/// Counters reported by the registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub in_flight: usize,
    pub started: u64,
    pub deduplicated: u64,
    pub rejected: u64,
    pub expired: u64,
}

#[derive(Debug, Clone)]
pub(super) struct InFlightEntry {
    pub(super) task_id: Uuid,
    pub(super) client_id: String,
    pub(super) since: Instant,
}
