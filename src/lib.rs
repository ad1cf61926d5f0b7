//! # bdo-search-rs
//!
//! Batch adventurer search gateway. A client submits up to 200 names in one
//! request; each is validated, served from the profile cache when possible,
//! and otherwise admitted as a scrape task under per-client and global
//! concurrency ceilings.
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use bdo_search_rs::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config)?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Embedding the orchestrator
//!
//! The [`core::batch::BatchOrchestrator`] only depends on the collaborator
//! traits in [`core`], so it can be driven without the HTTP layer.

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

pub use config::Config;
pub use core::batch::{
    BatchOrchestrator, BatchSearchRequest, BatchSearchResponse, ItemOutcome, ItemStatus,
    RequestContext,
};
pub use utils::error::{GatewayError, Result};

use tracing::info;

/// The search gateway: configuration plus the HTTP server built from it
pub struct Gateway {
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");
        let server = server::HttpServer::new(&config)?;
        Ok(Self { server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!(
            "Starting {} {} on {}",
            NAME,
            VERSION,
            self.server.config().address()
        );
        self.server.start().await
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Gateway build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Seconds since the epoch at build time
    pub build_time: &'static str,
    pub git_hash: &'static str,
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

/// Build metadata recorded by the build script
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
