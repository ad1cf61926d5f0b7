//! Profile cache configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Profile cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached search results
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: u64,
    /// Time-to-live for cached search results, in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_cache_max_entries(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

impl CacheConfig {
    /// Validate cache configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_entries == 0 {
            return Err("Cache max entries cannot be 0".to_string());
        }
        if self.ttl_secs == 0 {
            return Err("Cache TTL cannot be 0".to_string());
        }
        Ok(())
    }
}
