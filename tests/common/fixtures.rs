//! Test fixtures and data factories
//!
//! Everything here builds real objects; the only thing missing from a
//! production wiring is the upstream fetcher, so admitted tasks stay in
//! flight until the test completes them.

use actix_web::web;
use bdo_search_rs::config::Config;
use bdo_search_rs::core::admission::TaskReceiver;
use bdo_search_rs::core::profile_cache::ProfileCache;
use bdo_search_rs::core::types::{Profile, Region, SearchKey, SearchType};
use bdo_search_rs::server::AppState;
use serde_json::{Value, json};

/// Admin token configured by [`test_config`]
pub const ADMIN_TOKEN: &str = "integration-admin-token";

/// Configuration with small ceilings so saturation is easy to reach
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.gateway.auth.admin_token = ADMIN_TOKEN.to_string();
    config.gateway.scraper.max_tasks_total = 10;
    config.gateway.scraper.max_tasks_per_client = 3;
    config.gateway.cache.ttl_secs = 60;
    config
}

/// Shared state plus the task queue it feeds
pub struct TestGateway {
    pub state: AppState,
    pub receiver: TaskReceiver,
}

impl TestGateway {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let (state, receiver) = AppState::new(config);
        Self { state, receiver }
    }

    /// Store a successful search result
    pub async fn seed_profile(&self, region: Region, search_type: SearchType, name: &str) {
        self.state
            .cache
            .add_record(
                SearchKey::new(region, name, search_type),
                vec![Profile::named(name)],
                200,
            )
            .await;
    }

    /// Store a failed search result
    pub async fn seed_failure(&self, region: Region, search_type: SearchType, name: &str, status: u16) {
        self.state
            .cache
            .add_record(SearchKey::new(region, name, search_type), Vec::new(), status)
            .await;
    }

    /// Handler data for `HttpServer::create_app`
    pub fn data(&self) -> web::Data<AppState> {
        web::Data::new(self.state.clone())
    }
}

impl Default for TestGateway {
    fn default() -> Self {
        Self::new()
    }
}

/// Factory for batch search request bodies
pub struct BatchRequestFactory;

impl BatchRequestFactory {
    /// Character-name batch in the EU region
    pub fn characters(queries: &[&str]) -> Value {
        json!({
            "region": "eu",
            "searchType": "characterName",
            "queries": queries,
        })
    }

    /// Family-name batch in the given region
    pub fn families(region: &str, queries: &[&str]) -> Value {
        json!({
            "region": region,
            "searchType": "familyName",
            "queries": queries,
        })
    }

    /// Batch of `size` distinct valid names
    pub fn sized(size: usize) -> Value {
        let queries: Vec<String> = (0..size).map(|i| format!("Adventurer{}", i)).collect();
        json!({
            "region": "na",
            "searchType": "familyName",
            "queries": queries,
        })
    }

    /// Same body with cache bypass requested
    pub fn bypassing(mut body: Value) -> Value {
        body["bypassCache"] = json!(true);
        body
    }
}
