//! Admin authorization for cache bypass

use crate::config::AuthConfig;
use sha2::{Digest, Sha256};

/// Decides whether a presented credential may bypass the profile cache
#[cfg_attr(test, mockall::automock)]
pub trait BypassAuthorizer: Send + Sync {
    fn is_authorized(&self, credential: &str) -> bool;
}

/// Compares credentials against a configured admin token.
///
/// Only the SHA-256 digest of the token is kept in memory and digests are
/// compared without early exit.
pub struct AdminTokenAuthorizer {
    token_digest: Option<Vec<u8>>,
}

impl AdminTokenAuthorizer {
    pub fn new(admin_token: &str) -> Self {
        let token_digest = if admin_token.is_empty() {
            None
        } else {
            Some(Sha256::digest(admin_token.as_bytes()).to_vec())
        };
        Self { token_digest }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.admin_token)
    }

    /// Authorizer that never grants bypass
    pub fn disabled() -> Self {
        Self { token_digest: None }
    }
}

impl BypassAuthorizer for AdminTokenAuthorizer {
    fn is_authorized(&self, credential: &str) -> bool {
        let Some(expected) = &self.token_digest else {
            return false;
        };

        let token = credential.strip_prefix("Bearer ").unwrap_or(credential).trim();
        if token.is_empty() {
            return false;
        }

        let presented = Sha256::digest(token.as_bytes());
        expected.len() == presented.len()
            && expected
                .iter()
                .zip(presented.iter())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}
