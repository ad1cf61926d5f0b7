//! In-flight task registry

use super::types::{
    AdmissionOutcome, InFlightEntry, RegistryStats, SearchTask, TaskLimits, TaskReceiver,
};
use super::AdmissionController;
use crate::config::ScraperConfig;
use crate::core::types::SearchKey;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Default)]
struct RegistryState {
    in_flight: HashMap<SearchKey, InFlightEntry>,
    per_client: HashMap<String, usize>,
}

impl RegistryState {
    fn release(&mut self, key: &SearchKey) -> Option<InFlightEntry> {
        let entry = self.in_flight.remove(key)?;
        if let Some(count) = self.per_client.get_mut(&entry.client_id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.per_client.remove(&entry.client_id);
            }
        }
        Some(entry)
    }

    fn reap(&mut self, timeout: Duration, now: Instant) -> usize {
        let expired: Vec<SearchKey> = self
            .in_flight
            .iter()
            .filter(|(_, entry)| now.duration_since(entry.since) >= timeout)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.release(key);
        }
        expired.len()
    }
}

/// Tracks in-flight search tasks and admits new ones under ceilings.
///
/// The dedupe check, ceiling checks and insertion happen under one lock, so
/// two concurrent requests for the same key never both observe `Started`.
pub struct TaskRegistry {
    state: Mutex<RegistryState>,
    limits: TaskLimits,
    sender: mpsc::UnboundedSender<SearchTask>,
    started: AtomicU64,
    deduplicated: AtomicU64,
    rejected: AtomicU64,
    expired: AtomicU64,
}

impl TaskRegistry {
    /// Create a registry and the queue its admitted tasks are sent to
    pub fn new(limits: TaskLimits) -> (Self, TaskReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let registry = Self {
            state: Mutex::new(RegistryState::default()),
            limits,
            sender,
            started: AtomicU64::new(0),
            deduplicated: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            expired: AtomicU64::new(0),
        };
        (registry, receiver)
    }

    pub fn from_config(config: &ScraperConfig) -> (Self, TaskReceiver) {
        Self::new(TaskLimits {
            max_total: config.max_tasks_total,
            max_per_client: config.max_tasks_per_client,
            task_timeout: Duration::from_secs(config.task_timeout_secs),
        })
    }

    /// Atomically dedupe, check ceilings and register a task
    pub fn admit(&self, client_id: &str, key: &SearchKey) -> AdmissionOutcome {
        let now = Instant::now();
        let mut state = self.state.lock();

        let reaped = state.reap(self.limits.task_timeout, now);
        if reaped > 0 {
            self.expired.fetch_add(reaped as u64, Ordering::Relaxed);
            debug!(reaped, "dropped expired in-flight tasks");
        }

        if state.in_flight.contains_key(key) {
            self.deduplicated.fetch_add(1, Ordering::Relaxed);
            return AdmissionOutcome::Pending;
        }

        let client_active = state.per_client.get(client_id).copied().unwrap_or(0);
        if state.in_flight.len() >= self.limits.max_total
            || client_active >= self.limits.max_per_client
        {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            return AdmissionOutcome::CeilingExceeded;
        }

        let task = SearchTask {
            id: Uuid::new_v4(),
            client_id: client_id.to_string(),
            key: key.clone(),
            admitted_at: chrono::Utc::now(),
        };

        state.in_flight.insert(
            key.clone(),
            InFlightEntry {
                task_id: task.id,
                client_id: task.client_id.clone(),
                since: now,
            },
        );
        *state.per_client.entry(task.client_id.clone()).or_insert(0) += 1;
        drop(state);

        self.started.fetch_add(1, Ordering::Relaxed);
        if self.sender.send(task).is_err() {
            warn!(key = %key, "task queue has no consumer, task will expire unfetched");
        }

        AdmissionOutcome::Started
    }

    /// Release the slot held by a task. Ignored if the slot has since been
    /// reassigned to a newer task for the same key.
    pub fn complete(&self, task: &SearchTask) -> bool {
        let mut state = self.state.lock();
        let owns_slot = state
            .in_flight
            .get(&task.key)
            .is_some_and(|entry| entry.task_id == task.id);

        if owns_slot {
            state.release(&task.key);
        }
        owns_slot
    }

    /// Whether a task for the key is currently in flight
    pub fn is_in_flight(&self, key: &SearchKey) -> bool {
        self.state.lock().in_flight.contains_key(key)
    }

    /// Number of in-flight tasks owned by a client
    pub fn client_in_flight(&self, client_id: &str) -> usize {
        self.state
            .lock()
            .per_client
            .get(client_id)
            .copied()
            .unwrap_or(0)
    }

    /// Drop tasks that outlived the timeout
    pub fn cleanup(&self) -> usize {
        let reaped = self.state.lock().reap(self.limits.task_timeout, Instant::now());
        self.expired.fetch_add(reaped as u64, Ordering::Relaxed);
        reaped
    }

    /// Start background cleanup task
    pub fn start_cleanup_task(self: Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let reaped = self.cleanup();
                if reaped > 0 {
                    debug!(reaped, "periodic cleanup dropped expired tasks");
                }
            }
        })
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            in_flight: self.state.lock().in_flight.len(),
            started: self.started.load(Ordering::Relaxed),
            deduplicated: self.deduplicated.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
        }
    }

    pub fn limits(&self) -> TaskLimits {
        self.limits
    }
}

#[async_trait]
impl AdmissionController for TaskRegistry {
    async fn try_admit(&self, client_id: &str, key: &SearchKey) -> AdmissionOutcome {
        self.admit(client_id, key)
    }
}
