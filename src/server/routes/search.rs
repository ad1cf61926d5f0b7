//! Batch adventurer search endpoint

use crate::core::batch::{BatchSearchRequest, RequestContext};
use crate::server::middleware::{extract_admin_credential, extract_client_id, request_id_from};
use crate::server::state::AppState;
use actix_web::{HttpRequest, HttpResponse, web};

/// Response header carrying the number of submitted queries
pub const BATCH_SIZE_HEADER: &str = "X-Batch-Size";

/// Configure search routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/adventurer/search").route("/batch", web::post().to(batch_search)),
    );
}

/// Build the orchestrator's view of the caller
pub fn request_context(req: &HttpRequest, state: &AppState) -> RequestContext {
    RequestContext {
        client_id: extract_client_id(req, &state.config.server().client_ip_header),
        credential: extract_admin_credential(req, &state.config.auth().admin_header),
        request_id: request_id_from(req),
    }
}

/// `POST /v1/adventurer/search/batch`
pub async fn batch_search(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<BatchSearchRequest>,
) -> HttpResponse {
    let ctx = request_context(&req, &state);
    let batch_size = body.queries.len();

    match state.orchestrator.run(body.into_inner(), &ctx).await {
        Ok(response) => HttpResponse::Ok()
            .insert_header((BATCH_SIZE_HEADER, batch_size.to_string()))
            .json(response),
        Err(e) => e.to_response_with_request_id(ctx.request_id),
    }
}
