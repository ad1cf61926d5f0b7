//! Batch search endpoint integration tests

#[cfg(test)]
mod tests {
    use crate::common::assertions::error_message;
    use crate::common::{ADMIN_TOKEN, BatchRequestFactory, BatchResponseAssertions, TestGateway};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use bdo_search_rs::config::Config;
    use bdo_search_rs::core::types::{Region, SearchKey, SearchType};
    use bdo_search_rs::server::HttpServer;
    use serde_json::{Value, json};

    const BATCH_URI: &str = "/v1/adventurer/search/batch";

    fn post(body: &Value) -> test::TestRequest {
        test::TestRequest::post()
            .uri(BATCH_URI)
            .insert_header(("CF-Connecting-IP", "198.51.100.10"))
            .set_json(body)
    }

    // ==================== Happy path ====================

    #[actix_web::test]
    async fn test_cached_and_admitted_items() {
        let gw = TestGateway::new();
        gw.seed_profile(Region::Eu, SearchType::CharacterName, "Alice").await;
        let app = test::init_service(HttpServer::create_app(gw.data())).await;

        let res = test::call_service(
            &app,
            post(&BatchRequestFactory::characters(&["Alice", "Bob"])).to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get("X-Batch-Size").unwrap(), "2");

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["region"], "EU");
        assert_eq!(body["searchType"], "characterName");
        body.assert_consistent(2);
        body.assert_status(0, "cached", 200);
        assert_eq!(body["results"][0]["data"][0]["familyName"], "Alice");
        assert_eq!(body["results"][1]["query"], "Bob");
        assert_eq!(body["results"][1]["httpStatus"], 202);
        assert_eq!(body.stat("cached"), 1);
        assert_eq!(body.stat("started") + body.stat("pending"), 1);
    }

    #[actix_web::test]
    async fn test_stats_include_every_key_when_zero() {
        let gw = TestGateway::new();
        let app = test::init_service(HttpServer::create_app(gw.data())).await;

        let body: Value = test::call_and_read_body_json(
            &app,
            post(&BatchRequestFactory::characters(&["Alice"])).to_request(),
        )
        .await;

        assert_eq!(
            body["stats"],
            json!({"cached": 0, "started": 1, "pending": 0, "rejected": 0, "invalid": 0, "error": 0})
        );
        assert!(body["results"][0].get("data").is_none());
        assert!(body["results"][0].get("error").is_none());
    }

    #[actix_web::test]
    async fn test_task_is_queued_for_pipeline() {
        let mut gw = TestGateway::new();
        let app = test::init_service(HttpServer::create_app(gw.data())).await;

        test::call_service(
            &app,
            post(&BatchRequestFactory::families("kr", &["Mi"])).to_request(),
        )
        .await;

        let task = gw.receiver.try_recv().unwrap();
        assert_eq!(task.client_id, "198.51.100.10");
        assert_eq!(task.key, SearchKey::new(Region::Kr, "Mi", SearchType::FamilyName));
    }

    #[actix_web::test]
    async fn test_mixed_invalid_items_keep_order() {
        let gw = TestGateway::new();
        gw.seed_failure(Region::Eu, SearchType::CharacterName, "Ghost", 404).await;
        let app = test::init_service(HttpServer::create_app(gw.data())).await;

        let body: Value = test::call_and_read_body_json(
            &app,
            post(&BatchRequestFactory::characters(&["Al!ce", "Ghost", " Carol "])).to_request(),
        )
        .await;

        body.assert_consistent(3);
        body.assert_status(0, "invalid", 400);
        assert_eq!(body["results"][0]["query"], "Al!ce");
        assert!(!error_message_of(&body["results"][0]).is_empty());
        body.assert_status(1, "error", 404);
        assert_eq!(body["results"][1]["error"], "cached non-200 response");
        body.assert_status(2, "started", 202);
        assert_eq!(body["results"][2]["query"], "Carol");
    }

    fn error_message_of(item: &Value) -> &str {
        item["error"].as_str().unwrap_or_default()
    }

    #[actix_web::test]
    async fn test_resubmission_turns_started_into_pending() {
        let gw = TestGateway::new();
        let app = test::init_service(HttpServer::create_app(gw.data())).await;
        let batch = BatchRequestFactory::characters(&["Bob"]);

        let first: Value = test::call_and_read_body_json(&app, post(&batch).to_request()).await;
        let second: Value = test::call_and_read_body_json(&app, post(&batch).to_request()).await;

        first.assert_status(0, "started", 202);
        second.assert_status(0, "pending", 202);
    }

    #[actix_web::test]
    async fn test_per_client_ceiling_rejects_items() {
        let gw = TestGateway::new();
        let app = test::init_service(HttpServer::create_app(gw.data())).await;

        let body: Value = test::call_and_read_body_json(
            &app,
            post(&BatchRequestFactory::characters(&["One", "Two", "Three", "Four", "Two"]))
                .to_request(),
        )
        .await;

        body.assert_consistent(5);
        assert_eq!(body.stat("started"), 3);
        body.assert_status(3, "rejected", 429);
        assert_eq!(
            body["results"][3]["error"],
            "You have exceeded the maximum number of concurrent tasks."
        );
        body.assert_status(4, "pending", 202);

        let other_client = test::TestRequest::post()
            .uri(BATCH_URI)
            .insert_header(("CF-Connecting-IP", "198.51.100.99"))
            .set_json(BatchRequestFactory::characters(&["Four"]))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, other_client).await;
        body.assert_status(0, "started", 202);
    }

    #[actix_web::test]
    async fn test_largest_batch_is_accepted() {
        let mut config = crate::common::test_config();
        config.gateway.scraper.max_tasks_total = 500;
        config.gateway.scraper.max_tasks_per_client = 500;
        let gw = TestGateway::with_config(config);
        let app = test::init_service(HttpServer::create_app(gw.data())).await;

        let res = test::call_service(&app, post(&BatchRequestFactory::sized(200)).to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get("X-Batch-Size").unwrap(), "200");
        let body: Value = test::read_body_json(res).await;
        body.assert_consistent(200);
        assert_eq!(body.stat("started"), 200);
    }

    // ==================== Cache bypass ====================

    #[actix_web::test]
    async fn test_authorized_bypass_ignores_cache() {
        let gw = TestGateway::new();
        gw.seed_profile(Region::Eu, SearchType::CharacterName, "Alice").await;
        let app = test::init_service(HttpServer::create_app(gw.data())).await;

        let req = post(&BatchRequestFactory::bypassing(BatchRequestFactory::characters(&[
            "Alice",
        ])))
        .insert_header(("Authorization", format!("Bearer {}", ADMIN_TOKEN)))
        .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        body.assert_status(0, "started", 202);
        assert_eq!(body.stat("cached"), 0);
    }

    #[actix_web::test]
    async fn test_unauthorized_bypass_is_downgraded() {
        let gw = TestGateway::new();
        gw.seed_profile(Region::Eu, SearchType::CharacterName, "Alice").await;
        let app = test::init_service(HttpServer::create_app(gw.data())).await;

        for auth in [None, Some("Bearer wrong-token")] {
            let mut req = post(&BatchRequestFactory::bypassing(
                BatchRequestFactory::characters(&["Alice"]),
            ));
            if let Some(auth) = auth {
                req = req.insert_header(("Authorization", auth));
            }
            let body: Value = test::call_and_read_body_json(&app, req.to_request()).await;
            body.assert_status(0, "cached", 200);
        }
    }

    // ==================== Batch gate ====================

    async fn gate_error(body: &str, config: Config) -> (StatusCode, Value) {
        let gw = TestGateway::with_config(config);
        let app = test::init_service(HttpServer::create_app(gw.data())).await;
        let req = test::TestRequest::post()
            .uri(BATCH_URI)
            .insert_header(("content-type", "application/json"))
            .insert_header(("x-request-id", "gate-test-1"))
            .set_payload(body.to_string())
            .to_request();
        let res = test::call_service(&app, req).await;
        let status = res.status();
        assert!(res.headers().get("X-Batch-Size").is_none());
        (status, test::read_body_json(res).await)
    }

    #[actix_web::test]
    async fn test_malformed_json_is_rejected() {
        let (status, body) = gate_error("{\"queries\": [", crate::common::test_config()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), "Invalid JSON body.");
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert_eq!(body["error"]["request_id"], "gate-test-1");
    }

    #[actix_web::test]
    async fn test_body_is_decoded_regardless_of_content_type() {
        let gw = TestGateway::new();
        let app = test::init_service(HttpServer::create_app(gw.data())).await;
        let payload = r#"{"region":"eu","searchType":"characterName","queries":["Alice"]}"#;

        let bare = test::TestRequest::post()
            .uri(BATCH_URI)
            .set_payload(payload)
            .to_request();
        let res = test::call_service(&app, bare).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        body.assert_status(0, "started", 202);

        let plain = test::TestRequest::post()
            .uri(BATCH_URI)
            .insert_header(("content-type", "text/plain"))
            .set_payload(payload)
            .to_request();
        let res = test::call_service(&app, plain).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        body.assert_status(0, "pending", 202);
    }

    #[actix_web::test]
    async fn test_oversized_body_is_rejected_as_invalid_json() {
        let mut config = crate::common::test_config();
        config.gateway.server.max_body_size = 64;
        let payload = BatchRequestFactory::sized(20).to_string();

        let (status, body) = gate_error(&payload, config).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), "Invalid JSON body.");
    }

    #[actix_web::test]
    async fn test_empty_and_oversized_lists() {
        let (status, body) = gate_error(
            &BatchRequestFactory::characters(&[]).to_string(),
            crate::common::test_config(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), "queries list cannot be empty.");

        let (status, body) = gate_error(
            &BatchRequestFactory::sized(201).to_string(),
            crate::common::test_config(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), "queries list exceeds max size of 200.");
    }

    #[actix_web::test]
    async fn test_missing_queries_field_is_empty_list() {
        let (status, body) = gate_error(r#"{"region":"eu"}"#, crate::common::test_config()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), "queries list cannot be empty.");
    }

    #[actix_web::test]
    async fn test_null_fields_decode_as_zero_values() {
        let (status, body) = gate_error(
            r#"{"region":null,"searchType":null,"queries":null,"bypassCache":null}"#,
            crate::common::test_config(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), "queries list cannot be empty.");
    }

    #[actix_web::test]
    async fn test_unsupported_region() {
        let (status, body) = gate_error(
            &BatchRequestFactory::families("mars", &["Alice"]).to_string(),
            crate::common::test_config(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), "Region MARS is not supported.");
    }

    #[actix_web::test]
    async fn test_region_under_maintenance() {
        let mut config = crate::common::test_config();
        config.gateway.maintenance.regions = vec!["SA".to_string()];

        let (status, body) = gate_error(
            &BatchRequestFactory::families("sa", &["Alice"]).to_string(),
            config,
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "MAINTENANCE");
    }

    // ==================== Health ====================

    #[actix_web::test]
    async fn test_health_reports_live_counts() {
        let gw = TestGateway::new();
        let app = test::init_service(HttpServer::create_app(gw.data())).await;

        test::call_service(
            &app,
            post(&BatchRequestFactory::characters(&["Alice", "Bob"])).to_request(),
        )
        .await;

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/health").to_request(),
        )
        .await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["in_flight_tasks"], 2);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
