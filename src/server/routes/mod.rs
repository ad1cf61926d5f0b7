//! HTTP route modules

pub mod admin;
pub mod health;
pub mod search;

use actix_web::web;

/// Register every route of the gateway
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    search::configure_routes(cfg);
    admin::configure_routes(cfg);
}
