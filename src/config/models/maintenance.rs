//! Maintenance configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Maintenance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceConfig {
    /// Regions that are permanently flagged as under maintenance
    #[serde(default)]
    pub regions: Vec<String>,
    /// How long a region stays flagged after upstream reports maintenance
    #[serde(default = "default_maintenance_duration")]
    pub default_duration_secs: u64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            default_duration_secs: default_maintenance_duration(),
        }
    }
}

impl MaintenanceConfig {
    /// Validate maintenance configuration
    pub fn validate(&self) -> Result<(), String> {
        for region in &self.regions {
            crate::core::validators::validate_region(region)?;
        }
        let max_secs = crate::core::maintenance::MAX_MAINTENANCE_DURATION.as_secs();
        if self.default_duration_secs == 0 || self.default_duration_secs > max_secs {
            return Err(format!(
                "default_duration_secs must be between 1 and {}",
                max_secs
            ));
        }
        Ok(())
    }
}
