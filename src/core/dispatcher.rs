//! Hand-off of admitted search tasks to a profile fetcher
//!
//! The dispatcher drains the task queue, runs fetches with bounded
//! concurrency, stores outcomes in the profile cache and releases the task's
//! slot in the registry.

use crate::config::ScraperConfig;
use crate::core::admission::{SearchTask, TaskReceiver, TaskRegistry};
use crate::core::maintenance::MaintenanceRegistry;
use crate::core::profile_cache::{ProfileCache, STATUS_OK};
use crate::core::types::{Profile, SearchKey};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Status stored when a search found nobody
pub const STATUS_NOT_FOUND: u16 = 404;

/// What a fetch returned
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Found(Vec<Profile>),
    NotFound,
    Maintenance,
}

/// Source of fresh search results
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    async fn fetch(&self, key: &SearchKey) -> Result<FetchOutcome>;
}

/// Fetches results from an upstream JSON endpoint.
///
/// Sends `GET <upstream>?region=EU&query=Name&searchType=2` and expects a JSON
/// array of profiles. 404 means no match, 503 means maintenance.
pub struct HttpProfileFetcher {
    client: reqwest::Client,
    upstream: url::Url,
}

impl HttpProfileFetcher {
    pub fn new(upstream: &str, timeout: Duration) -> Result<Self> {
        let upstream = url::Url::parse(upstream)
            .map_err(|e| GatewayError::config(format!("Invalid upstream URL: {}", e)))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bdo-search-rs/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, upstream })
    }

    /// Build a fetcher when an upstream is configured
    pub fn from_config(config: &ScraperConfig) -> Result<Option<Self>> {
        config
            .upstream_url
            .as_deref()
            .map(|upstream| Self::new(upstream, Duration::from_secs(config.request_timeout_secs)))
            .transpose()
    }

    fn request_url(&self, key: &SearchKey) -> url::Url {
        let mut url = self.upstream.clone();
        url.query_pairs_mut()
            .append_pair("region", key.region.as_str())
            .append_pair("query", &key.query)
            .append_pair("searchType", key.search_type.code());
        url
    }
}

#[async_trait]
impl ProfileFetcher for HttpProfileFetcher {
    async fn fetch(&self, key: &SearchKey) -> Result<FetchOutcome> {
        let response = self.client.get(self.request_url(key)).send().await?;

        match response.status().as_u16() {
            200 => {
                let profiles: Vec<Profile> = response.json().await?;
                if profiles.is_empty() {
                    Ok(FetchOutcome::NotFound)
                } else {
                    Ok(FetchOutcome::Found(profiles))
                }
            }
            404 => Ok(FetchOutcome::NotFound),
            503 => Ok(FetchOutcome::Maintenance),
            status => Err(GatewayError::network(format!(
                "upstream returned status {}",
                status
            ))),
        }
    }
}

/// Drains admitted tasks and runs them against a fetcher
pub struct TaskDispatcher {
    fetcher: Arc<dyn ProfileFetcher>,
    cache: Arc<dyn ProfileCache>,
    registry: Arc<TaskRegistry>,
    maintenance: Arc<MaintenanceRegistry>,
    permits: Arc<Semaphore>,
}

impl TaskDispatcher {
    pub fn new(
        fetcher: Arc<dyn ProfileFetcher>,
        cache: Arc<dyn ProfileCache>,
        registry: Arc<TaskRegistry>,
        maintenance: Arc<MaintenanceRegistry>,
        concurrency: usize,
    ) -> Self {
        Self {
            fetcher,
            cache,
            registry,
            maintenance,
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    /// Consume the queue until every sender is dropped
    pub fn spawn(self: Arc<Self>, mut receiver: TaskReceiver) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            info!("Task dispatcher started");
            while let Some(task) = receiver.recv().await {
                let Ok(permit) = Arc::clone(&self.permits).acquire_owned().await else {
                    break;
                };
                let dispatcher = Arc::clone(&self);
                tokio::spawn(async move {
                    dispatcher.process(task).await;
                    drop(permit);
                });
            }
            info!("Task dispatcher stopped");
        })
    }

    /// Run one task to completion
    pub async fn process(&self, task: SearchTask) {
        debug!(task_id = %task.id, key = %task.key, "fetching profiles");

        match self.fetcher.fetch(&task.key).await {
            Ok(FetchOutcome::Found(profiles)) => {
                debug!(key = %task.key, count = profiles.len(), "profiles found");
                self.cache
                    .add_record(task.key.clone(), profiles, STATUS_OK)
                    .await;
            }
            Ok(FetchOutcome::NotFound) => {
                self.cache
                    .add_record(task.key.clone(), Vec::new(), STATUS_NOT_FOUND)
                    .await;
            }
            Ok(FetchOutcome::Maintenance) => {
                self.maintenance.mark(task.key.region, None);
            }
            Err(e) => {
                warn!(key = %task.key, error = %e, "profile fetch failed");
            }
        }

        self.registry.complete(&task);
    }
}
