//! Region maintenance flags

use crate::config::MaintenanceConfig;
use crate::core::types::Region;
use dashmap::DashMap;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Longest time a region can be flagged at runtime
pub const MAX_MAINTENANCE_DURATION: Duration = Duration::from_secs(7 * 24 * 3600);

/// Reports whether a region currently refuses searches
pub trait MaintenanceStatus: Send + Sync {
    fn is_under_maintenance(&self, region: Region) -> bool;
}

/// Maintenance flags: permanent ones from configuration plus temporary ones
/// raised at runtime that lapse on their own.
pub struct MaintenanceRegistry {
    permanent: HashSet<Region>,
    temporary: DashMap<Region, Instant>,
    default_duration: Duration,
}

impl MaintenanceRegistry {
    pub fn new(permanent: impl IntoIterator<Item = Region>, default_duration: Duration) -> Self {
        Self {
            permanent: permanent.into_iter().collect(),
            temporary: DashMap::new(),
            default_duration,
        }
    }

    /// Build from configuration. Unknown region names are skipped with a
    /// warning; `MaintenanceConfig::validate` rejects them earlier.
    pub fn from_config(config: &MaintenanceConfig) -> Self {
        let permanent = config.regions.iter().filter_map(|raw| match raw.parse() {
            Ok(region) => Some(region),
            Err(e) => {
                warn!("Ignoring maintenance region: {}", e);
                None
            }
        });
        Self::new(permanent, Duration::from_secs(config.default_duration_secs))
    }

    /// Flag a region for `duration`, or the configured default. Durations
    /// are capped at [`MAX_MAINTENANCE_DURATION`].
    pub fn mark(&self, region: Region, duration: Option<Duration>) {
        let duration = duration
            .unwrap_or(self.default_duration)
            .min(MAX_MAINTENANCE_DURATION);
        let Some(until) = Instant::now().checked_add(duration) else {
            warn!(region = %region, "maintenance deadline out of range, flag not raised");
            return;
        };
        info!(region = %region, secs = duration.as_secs(), "region flagged as under maintenance");
        self.temporary.insert(region, until);
    }

    /// Lift a temporary flag. Permanent flags stay.
    pub fn clear(&self, region: Region) -> bool {
        self.temporary.remove(&region).is_some()
    }

    /// Regions currently under maintenance
    pub fn active_regions(&self) -> Vec<Region> {
        Region::ALL
            .into_iter()
            .filter(|region| self.is_under_maintenance(*region))
            .collect()
    }
}

impl MaintenanceStatus for MaintenanceRegistry {
    fn is_under_maintenance(&self, region: Region) -> bool {
        if self.permanent.contains(&region) {
            return true;
        }

        let now = Instant::now();
        let active = self
            .temporary
            .get(&region)
            .is_some_and(|until| *until > now);

        if !active {
            self.temporary.remove_if(&region, |_, until| *until <= now);
        }
        active
    }
}
