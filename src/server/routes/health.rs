//! Health check endpoint

use crate::core::profile_cache::ProfileCache;
use crate::core::types::Region;
use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub version: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub cached_profiles: u64,
    pub in_flight_tasks: usize,
    pub maintenance: Vec<Region>,
}

/// Liveness plus live cache and task counts
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    let stats = state.registry.stats();
    let maintenance = state.maintenance.active_regions();

    HttpResponse::Ok().json(HealthStatus {
        status: if maintenance.is_empty() {
            Cow::Borrowed("healthy")
        } else {
            Cow::Borrowed("degraded")
        },
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        timestamp: chrono::Utc::now(),
        cached_profiles: state.cache.entry_count(),
        in_flight_tasks: stats.in_flight,
        maintenance,
    })
}
