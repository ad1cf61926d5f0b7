//! Helper functions for middleware and handlers

use super::request_id::REQUEST_ID_HEADER;
use actix_web::HttpRequest;

/// Client identity used for admission ceilings.
///
/// Taken from the configured proxy header, then the peer address, then
/// `"unknown"`.
pub fn extract_client_id(req: &HttpRequest, client_ip_header: &str) -> String {
    header_str(req, client_ip_header)
        .map(str::to_string)
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Admin credential presented by the caller, if any
pub fn extract_admin_credential(req: &HttpRequest, admin_header: &str) -> Option<String> {
    header_str(req, admin_header).map(str::to_string)
}

/// Request id assigned by [`super::RequestIdMiddleware`]
pub fn request_id_from(req: &HttpRequest) -> Option<String> {
    header_str(req, REQUEST_ID_HEADER).map(str::to_string)
}

fn header_str<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
