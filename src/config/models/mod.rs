//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

#![allow(missing_docs)]

pub mod auth;
pub mod cache;
pub mod gateway;
pub mod maintenance;
pub mod scraper;
pub mod server;

// Re-export all configuration types
pub use auth::*;
pub use cache::*;
pub use gateway::*;
pub use maintenance::*;
pub use scraper::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8001
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024 // 1MiB
}

pub fn default_admin_header() -> String {
    "Authorization".to_string()
}

pub fn default_client_ip_header() -> String {
    "CF-Connecting-IP".to_string()
}

pub fn default_cache_ttl() -> u64 {
    3 * 3600 // 3 hours
}

pub fn default_cache_max_entries() -> u64 {
    50_000
}

pub fn default_max_tasks_total() -> usize {
    1000
}

pub fn default_max_tasks_per_client() -> usize {
    200
}

pub fn default_task_timeout() -> u64 {
    120
}

pub fn default_worker_concurrency() -> usize {
    8
}

pub fn default_request_timeout() -> u64 {
    30
}

pub fn default_maintenance_duration() -> u64 {
    600
}

pub(crate) fn default_true() -> bool {
    true
}
