//! HTTP API tests over the real OpenAI client

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::{MockOpenAI, ResultLineFactory};
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use batch_gateway::BatchService;
    use batch_gateway::server::server::HttpServer;
    use batch_gateway::server::state::AppState;
    use serde_json::{Value, json};

    async fn state_for(api: &MockOpenAI) -> web::Data<AppState> {
        let config = api.config();
        let service = assert_ok!(BatchService::from_config(&config).await);
        web::Data::new(AppState::new(config, service))
    }

    #[actix_web::test]
    async fn test_prompt_ui_flow() {
        let api = MockOpenAI::start().await;
        api.expect_submission("file-in", "batch_ui").await;
        let app = test::init_service(HttpServer::create_app(state_for(&api).await)).await;

        let req = test::TestRequest::post()
            .uri("/api/prompts/add")
            .set_json(json!({"prompts": [
                {"id": "r1", "prompt": "Translate 'cat' to French"},
                {"id": "r2", "prompt": "Translate 'dog' to French"}
            ]}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::post()
            .uri("/api/batch/run-pending")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["batchId"], "batch_ui");

        api.reset().await;
        api.batch_status("batch_ui", "completed", Some("file-out"))
            .await;
        api.file_content(
            "file-out",
            &ResultLineFactory::file(&[
                ResultLineFactory::chat("r1", "chat"),
                ResultLineFactory::chat("r2", "chien"),
            ]),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/batch/sync").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["rows"][0]["result"], "chat");
        assert_eq!(body["rows"][1]["result"], "chien");
        assert_eq!(body["rows"][1]["status"], "completed");
        assert_eq!(body["meta"]["checked"], 1);

        let req = test::TestRequest::get()
            .uri("/api/batch/result?fileId=file-out")
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(String::from_utf8_lossy(&body).lines().count(), 2);
    }

    #[actix_web::test]
    async fn test_upstream_status_is_forwarded() {
        let api = MockOpenAI::start().await;
        api.batch_status_error("batch_gone", 404).await;
        let app = test::init_service(HttpServer::create_app(state_for(&api).await)).await;

        let req = test::TestRequest::get()
            .uri("/api/batch/status?batchId=batch_gone")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("upstream unavailable")
        );
    }

    #[actix_web::test]
    async fn test_status_passthrough_keeps_unknown_values() {
        let api = MockOpenAI::start().await;
        api.batch_status("batch_new", "paused_for_review", None).await;
        let app = test::init_service(HttpServer::create_app(state_for(&api).await)).await;

        let req = test::TestRequest::get()
            .uri("/api/batch/status?batchId=batch_new")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["id"], "batch_new");
        assert_eq!(body["status"], "paused_for_review");
    }

    #[actix_web::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let api = MockOpenAI::start().await;
        let mut config = api.config();
        // Nothing listens on port 9 of the loopback interface
        config.gateway.upstream.api_base = "http://127.0.0.1:9/v1".to_string();
        config.gateway.upstream.timeout = 2;
        let service = assert_ok!(BatchService::from_config(&config).await);
        let state = web::Data::new(AppState::new(config, service));
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/api/batch/status?batchId=b1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn test_remove_requires_ids_field() {
        let api = MockOpenAI::start().await;
        let app = test::init_service(HttpServer::create_app(state_for(&api).await)).await;

        let req = test::TestRequest::post()
            .uri("/api/batches/remove")
            .set_json(json!({"rows": ["r1"]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
