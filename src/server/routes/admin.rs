//! Admin endpoints for maintenance flags
//!
//! Guarded by the same admin token that authorizes cache bypass.

use crate::core::authorization::BypassAuthorizer;
use crate::core::maintenance::{MAX_MAINTENANCE_DURATION, MaintenanceStatus};
use crate::core::types::Region;
use crate::core::validators::validate_region;
use crate::server::middleware::{extract_admin_credential, request_id_from};
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::info;

/// Configure admin routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/maintenance")
            .route("", web::get().to(list_maintenance))
            .route("/{region}", web::put().to(mark_maintenance))
            .route("/{region}", web::delete().to(clear_maintenance)),
    );
}

#[derive(Debug, Default, Deserialize)]
pub struct MaintenanceQuery {
    /// Flag duration in seconds; the configured default when absent
    pub duration_secs: Option<u64>,
}

fn authorize(req: &HttpRequest, state: &AppState) -> Result<(), GatewayError> {
    let authorized = extract_admin_credential(req, &state.config.auth().admin_header)
        .is_some_and(|credential| state.authorizer.is_authorized(&credential));
    if authorized {
        Ok(())
    } else {
        Err(GatewayError::unauthorized("Admin token required"))
    }
}

fn parse_region(raw: &str) -> Result<Region, GatewayError> {
    validate_region(raw).map_err(GatewayError::bad_request)
}

fn parse_duration(secs: u64) -> Result<Duration, GatewayError> {
    let max_secs = MAX_MAINTENANCE_DURATION.as_secs();
    if secs == 0 || secs > max_secs {
        return Err(GatewayError::validation(format!(
            "duration_secs must be between 1 and {}",
            max_secs
        )));
    }
    Ok(Duration::from_secs(secs))
}

async fn list_maintenance(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Err(e) = authorize(&req, &state) {
        return e.to_response_with_request_id(request_id_from(&req));
    }
    HttpResponse::Ok().json(json!({ "regions": state.maintenance.active_regions() }))
}

async fn mark_maintenance(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<MaintenanceQuery>,
) -> HttpResponse {
    let region = match authorize(&req, &state).and_then(|_| parse_region(&path)) {
        Ok(region) => region,
        Err(e) => return e.to_response_with_request_id(request_id_from(&req)),
    };

    let duration = match query.duration_secs.map(parse_duration).transpose() {
        Ok(duration) => duration,
        Err(e) => return e.to_response_with_request_id(request_id_from(&req)),
    };

    state.maintenance.mark(region, duration);
    HttpResponse::Ok().json(json!({ "region": region, "maintenance": true }))
}

async fn clear_maintenance(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let region = match authorize(&req, &state).and_then(|_| parse_region(&path)) {
        Ok(region) => region,
        Err(e) => return e.to_response_with_request_id(request_id_from(&req)),
    };

    let cleared = state.maintenance.clear(region);
    info!(region = %region, cleared, "maintenance flag cleared by admin");
    HttpResponse::Ok().json(json!({
        "region": region,
        "cleared": cleared,
        "maintenance": state.maintenance.is_under_maintenance(region),
    }))
}
