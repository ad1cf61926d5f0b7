//! Scrape task admission and dispatch configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Scrape pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Ceiling on in-flight tasks across all clients
    #[serde(default = "default_max_tasks_total")]
    pub max_tasks_total: usize,
    /// Ceiling on in-flight tasks started by a single client
    #[serde(default = "default_max_tasks_per_client")]
    pub max_tasks_per_client: usize,
    /// Seconds after which an unfinished task is forgotten
    #[serde(default = "default_task_timeout")]
    pub task_timeout_secs: u64,
    /// Number of tasks the dispatcher runs at once
    #[serde(default = "default_worker_concurrency")]
    pub worker_concurrency: usize,
    /// Upstream profile endpoint. Without it admitted tasks are never fetched.
    #[serde(default)]
    pub upstream_url: Option<String>,
    /// Upstream request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_tasks_total: default_max_tasks_total(),
            max_tasks_per_client: default_max_tasks_per_client(),
            task_timeout_secs: default_task_timeout(),
            worker_concurrency: default_worker_concurrency(),
            upstream_url: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ScraperConfig {
    /// Validate scraper configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_tasks_total == 0 {
            return Err("max_tasks_total cannot be 0".to_string());
        }
        if self.max_tasks_per_client == 0 {
            return Err("max_tasks_per_client cannot be 0".to_string());
        }
        if self.max_tasks_per_client > self.max_tasks_total {
            return Err(format!(
                "max_tasks_per_client ({}) cannot exceed max_tasks_total ({})",
                self.max_tasks_per_client, self.max_tasks_total
            ));
        }
        if self.task_timeout_secs == 0 {
            return Err("task_timeout_secs cannot be 0".to_string());
        }
        if self.worker_concurrency == 0 {
            return Err("worker_concurrency cannot be 0".to_string());
        }
        if let Some(upstream) = &self.upstream_url {
            let parsed = url::Url::parse(upstream)
                .map_err(|e| format!("upstream_url is not a valid URL: {}", e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(format!(
                    "upstream_url must use http:// or https://, got: {}",
                    parsed.scheme()
                ));
            }
        }
        Ok(())
    }
}
