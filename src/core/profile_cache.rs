//! Profile search result cache
//!
//! Stores the outcome of past searches keyed by [`SearchKey`]. Both successful
//! (200) and failed (non-200) outcomes are stored; readers decide how to treat
//! each.

use crate::config::CacheConfig;
use crate::core::types::{Profile, SearchKey};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use moka::sync::Cache;
use std::time::Duration;
use tracing::debug;

/// Status stored for a successful search
pub const STATUS_OK: u16 = 200;

/// A previously stored search outcome
#[derive(Debug, Clone, PartialEq)]
pub struct CachedRecord {
    pub data: Vec<Profile>,
    pub status: u16,
    pub cached_at: DateTime<Utc>,
}

impl CachedRecord {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Keyed read/write access to stored search outcomes
#[async_trait]
pub trait ProfileCache: Send + Sync {
    /// Look up a stored outcome; `None` is a miss
    async fn get_record(&self, key: &SearchKey) -> Option<CachedRecord>;

    /// Store an outcome, replacing any previous one for the key
    async fn add_record(&self, key: SearchKey, data: Vec<Profile>, status: u16);

    /// Approximate number of stored outcomes
    fn entry_count(&self) -> u64;
}

/// In-memory cache with size bound and time-to-live
pub struct MokaProfileCache {
    inner: Cache<SearchKey, CachedRecord>,
}

impl MokaProfileCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries, Duration::from_secs(config.ttl_secs))
    }

    /// Flush pending maintenance so `entry_count` is exact
    pub fn sync(&self) {
        self.inner.run_pending_tasks();
    }
}

#[async_trait]
impl ProfileCache for MokaProfileCache {
    async fn get_record(&self, key: &SearchKey) -> Option<CachedRecord> {
        let record = self.inner.get(key);
        debug!(key = %key, hit = record.is_some(), "profile cache lookup");
        record
    }

    async fn add_record(&self, key: SearchKey, data: Vec<Profile>, status: u16) {
        let record = CachedRecord {
            data,
            status,
            cached_at: Utc::now(),
        };
        self.inner.insert(key, record);
    }

    fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}
