//! HTTP middleware and request helpers

mod helpers;
mod request_id;


pub use helpers::{extract_admin_credential, extract_client_id, request_id_from};
pub use request_id::{REQUEST_ID_HEADER, RequestIdMiddleware, RequestIdMiddlewareService};
