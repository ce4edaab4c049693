//! Mock OpenAI files and batches endpoints

use batch_gateway::Config;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "sk-test-key";

/// A running mock of the OpenAI batch API
pub struct MockOpenAI {
    pub server: MockServer,
}

impl MockOpenAI {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to put in `upstream.api_base`
    pub fn api_base(&self) -> String {
        format!("{}/v1", self.server.uri())
    }

    /// A validated in-memory configuration pointing at this mock
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.gateway.upstream.api_key = TEST_API_KEY.to_string();
        config.gateway.upstream.api_base = self.api_base();
        config.gateway.storage.backend = batch_gateway::config::StorageBackend::Memory;
        config
    }

    /// Accept one file upload and one batch creation
    pub async fn expect_submission(&self, file_id: &str, batch_id: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/files"))
            .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": file_id,
                "object": "file",
                "purpose": "batch",
                "filename": "batch.jsonl"
            })))
            .expect(1)
            .mount(&self.server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/batches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": batch_id,
                "object": "batch",
                "status": "validating",
                "input_file_id": file_id,
                "endpoint": "/v1/responses",
                "completion_window": "24h"
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Serve a batch status until the mock is reset
    pub async fn batch_status(&self, batch_id: &str, status: &str, output_file_id: Option<&str>) {
        Mock::given(method("GET"))
            .and(path(format!("/v1/batches/{}", batch_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": batch_id,
                "object": "batch",
                "status": status,
                "output_file_id": output_file_id,
                "request_counts": {"total": 1, "completed": 1, "failed": 0}
            })))
            .mount(&self.server)
            .await;
    }

    /// Fail status queries for a batch
    pub async fn batch_status_error(&self, batch_id: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/v1/batches/{}", batch_id)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": {"message": "upstream unavailable", "type": "server_error"}
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve an output file
    pub async fn file_content(&self, file_id: &str, content: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/v1/files/{}/content", file_id)))
            .respond_with(ResponseTemplate::new(200).set_body_string(content))
            .mount(&self.server)
            .await;
    }

    /// Drop every mounted mock
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
