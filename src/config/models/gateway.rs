//! Main gateway configuration

#![allow(missing_docs)]

use super::*;
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Profile cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Scrape task configuration
    #[serde(default)]
    pub scraper: ScraperConfig,
    /// Maintenance configuration
    #[serde(default)]
    pub maintenance: MaintenanceConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables on top of defaults
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env()
    }

    /// Override fields from environment variables
    pub fn apply_env(mut self) -> Result<Self> {
        debug!("Applying configuration overrides from environment");

        if let Ok(host) = env::var("BDO_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("BDO_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Ok(workers) = env::var("BDO_WORKERS") {
            self.server.workers = Some(
                workers
                    .parse()
                    .map_err(|e| GatewayError::Config(format!("Invalid workers count: {}", e)))?,
            );
        }
        if let Ok(token) = env::var("BDO_ADMIN_TOKEN") {
            self.auth.admin_token = token;
        }
        if let Ok(upstream) = env::var("BDO_UPSTREAM_URL") {
            self.scraper.upstream_url = Some(upstream);
        }

        Ok(self)
    }
}
