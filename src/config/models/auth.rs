//! Authentication configuration

use super::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Minimum admin token length considered safe
const MIN_ADMIN_TOKEN_LEN: usize = 16;

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Token that unlocks admin-only behavior such as cache bypass.
    /// Empty disables admin access entirely.
    #[serde(default)]
    pub admin_token: String,
    /// Header carrying the admin token
    #[serde(default = "default_admin_header")]
    pub admin_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_token: String::new(),
            admin_header: default_admin_header(),
        }
    }
}

impl AuthConfig {
    /// Whether an admin token has been configured
    pub fn admin_enabled(&self) -> bool {
        !self.admin_token.is_empty()
    }

    /// Validate auth configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.admin_header.trim().is_empty() {
            return Err("Admin header name cannot be empty".to_string());
        }
        if self.admin_token.chars().any(char::is_whitespace) {
            return Err("Admin token cannot contain whitespace".to_string());
        }
        Ok(())
    }
}

/// Log warnings for configurations that work but are weak
pub fn warn_insecure_config(config: &AuthConfig) {
    if !config.admin_enabled() {
        warn!("No admin token configured, cache bypass is disabled for every caller");
    } else if config.admin_token.len() < MIN_ADMIN_TOKEN_LEN {
        warn!(
            "Admin token is shorter than {} characters",
            MIN_ADMIN_TOKEN_LEN
        );
    }
}
