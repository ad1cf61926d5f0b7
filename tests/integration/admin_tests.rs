//! Admin maintenance endpoint integration tests

#[cfg(test)]
mod tests {
    use crate::common::{ADMIN_TOKEN, BatchRequestFactory, TestGateway};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use bdo_search_rs::server::HttpServer;
    use serde_json::Value;

    fn admin(req: test::TestRequest) -> test::TestRequest {
        req.insert_header(("Authorization", format!("Bearer {}", ADMIN_TOKEN)))
    }

    #[actix_web::test]
    async fn test_admin_routes_require_token() {
        let gw = TestGateway::new();
        let app = test::init_service(HttpServer::create_app(gw.data())).await;

        let res = test::call_service(
            &app,
            test::TestRequest::put().uri("/admin/maintenance/eu").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/admin/maintenance")
                .insert_header(("Authorization", "Bearer nope"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_mark_and_clear_maintenance() {
        let gw = TestGateway::new();
        let app = test::init_service(HttpServer::create_app(gw.data())).await;
        let batch = BatchRequestFactory::families("na", &["Alice"]);

        let res = test::call_service(
            &app,
            admin(test::TestRequest::put().uri("/admin/maintenance/na?duration_secs=300"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let listed: Value = test::call_and_read_body_json(
            &app,
            admin(test::TestRequest::get().uri("/admin/maintenance")).to_request(),
        )
        .await;
        assert_eq!(listed["regions"], serde_json::json!(["NA"]));

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/v1/adventurer/search/batch")
                .set_json(&batch)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

        let cleared: Value = test::call_and_read_body_json(
            &app,
            admin(test::TestRequest::delete().uri("/admin/maintenance/na")).to_request(),
        )
        .await;
        assert_eq!(cleared["cleared"], true);
        assert_eq!(cleared["maintenance"], false);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/v1/adventurer/search/batch")
                .set_json(&batch)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_unknown_region_is_bad_request() {
        let gw = TestGateway::new();
        let app = test::init_service(HttpServer::create_app(gw.data())).await;

        let res = test::call_service(
            &app,
            admin(test::TestRequest::put().uri("/admin/maintenance/mars")).to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_out_of_range_duration_is_rejected() {
        let gw = TestGateway::new();
        let app = test::init_service(HttpServer::create_app(gw.data())).await;

        let res = test::call_service(
            &app,
            admin(test::TestRequest::put().uri(
                "/admin/maintenance/eu?duration_secs=18446744073709551615",
            ))
            .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let listed: Value = test::call_and_read_body_json(
            &app,
            admin(test::TestRequest::get().uri("/admin/maintenance")).to_request(),
        )
        .await;
        assert_eq!(listed["regions"], serde_json::json!([]));
    }
}
