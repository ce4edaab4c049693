//! Submit/sync lifecycle tests
//!
//! Prompts go through the service, the real HTTP client and a mocked
//! OpenAI API, and the stored rows are checked after every step.

#[cfg(test)]
mod tests {
    use crate::common::{MockOpenAI, PromptFactory, ResultLineFactory};
    use crate::{assert_err, assert_ok};
    use batch_gateway::{BatchService, GatewayError, RowStatus};

    async fn service_for(api: &MockOpenAI) -> BatchService {
        assert_ok!(BatchService::from_config(&api.config()).await)
    }

    // ==================== Submission ====================

    #[tokio::test]
    async fn test_submit_registers_queued_rows() {
        let api = MockOpenAI::start().await;
        api.expect_submission("file-abc", "batch_abc").await;
        let service = service_for(&api).await;

        let submitted = assert_ok!(service.submit_batch(PromptFactory::many(3), None).await);
        assert_eq!(submitted.batch_id, "batch_abc");
        assert_eq!(submitted.input_file_id, "file-abc");

        let rows = assert_ok!(service.list_rows().await);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.status == RowStatus::Queued));
        assert!(rows.iter().all(|row| row.batch_id.as_deref() == Some("batch_abc")));
    }

    #[tokio::test]
    async fn test_submit_upload_failure_surfaces_status() {
        let api = MockOpenAI::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/v1/files"))
            .respond_with(wiremock::ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&api.server)
            .await;
        let service = service_for(&api).await;

        let result = service.submit_batch(PromptFactory::many(1), None).await;
        assert_err!(result, GatewayError::Upstream { status: 401, .. });
        assert!(assert_ok!(service.list_rows().await).is_empty());
    }

    // ==================== Synchronization ====================

    #[tokio::test]
    async fn test_full_lifecycle_with_results() {
        let api = MockOpenAI::start().await;
        api.expect_submission("file-in", "batch_1").await;
        let service = service_for(&api).await;

        assert_ok!(service.add_prompts(PromptFactory::many(2)).await);
        assert_ok!(service.submit_pending(None).await);

        api.batch_status("batch_1", "in_progress", None).await;
        let outcome = assert_ok!(service.run_sync_cycle().await);
        assert!(outcome.rows.iter().all(|row| row.status == RowStatus::Running));
        assert_eq!(outcome.report.updated, 2);

        api.reset().await;
        api.batch_status("batch_1", "completed", Some("file-out")).await;
        api.file_content(
            "file-out",
            &ResultLineFactory::file(&[
                ResultLineFactory::chat("r1", "hello"),
                ResultLineFactory::responses("r2", "world"),
            ]),
        )
        .await;

        let outcome = assert_ok!(service.run_sync_cycle().await);
        assert_eq!(outcome.rows[0].status, RowStatus::Completed);
        assert_eq!(outcome.rows[0].result.as_deref(), Some("hello"));
        assert_eq!(outcome.rows[1].result.as_deref(), Some("world"));

        // Terminal rows are not polled again
        api.reset().await;
        let outcome = assert_ok!(service.run_sync_cycle().await);
        assert_eq!(outcome.report.checked, 0);
        assert_eq!(assert_ok!(service.list_rows().await), outcome.rows);
    }

    #[tokio::test]
    async fn test_expired_batch_marks_rows_failed() {
        let api = MockOpenAI::start().await;
        api.expect_submission("file-in", "batch_1").await;
        let service = service_for(&api).await;
        assert_ok!(service.submit_batch(PromptFactory::many(1), None).await);

        api.batch_status("batch_1", "expired", None).await;
        let outcome = assert_ok!(service.run_sync_cycle().await);

        let row = &outcome.rows[0];
        assert_eq!(row.status, RowStatus::Failed);
        assert!(row.error.as_deref().unwrap_or_default().contains("expired"));
        assert!(row.result.is_none());
    }

    #[tokio::test]
    async fn test_status_error_leaves_rows_for_next_cycle() {
        let api = MockOpenAI::start().await;
        api.expect_submission("file-in", "batch_1").await;
        let service = service_for(&api).await;
        assert_ok!(service.submit_batch(PromptFactory::many(1), None).await);

        api.batch_status_error("batch_1", 500).await;
        let outcome = assert_ok!(service.run_sync_cycle().await);
        assert_eq!(outcome.report.skipped, 1);
        assert_eq!(outcome.rows[0].status, RowStatus::Queued);

        api.reset().await;
        api.batch_status("batch_1", "finalizing", None).await;
        let outcome = assert_ok!(service.run_sync_cycle().await);
        assert_eq!(outcome.rows[0].status, RowStatus::Running);
    }

    #[tokio::test]
    async fn test_unknown_remote_status_counts_as_running() {
        let api = MockOpenAI::start().await;
        api.expect_submission("file-in", "batch_1").await;
        let service = service_for(&api).await;
        assert_ok!(service.submit_batch(PromptFactory::many(1), None).await);

        api.batch_status("batch_1", "paused_for_review", None).await;
        let outcome = assert_ok!(service.run_sync_cycle().await);
        assert_eq!(outcome.rows[0].status, RowStatus::Running);
    }

    // ==================== Passthrough ====================

    #[tokio::test]
    async fn test_status_and_result_passthrough() {
        let api = MockOpenAI::start().await;
        api.batch_status("batch_9", "completed", Some("file-9")).await;
        api.file_content("file-9", "raw-line\n").await;
        let service = service_for(&api).await;

        let batch = assert_ok!(service.batch_status("batch_9").await);
        assert_eq!(batch.output_file_id.as_deref(), Some("file-9"));
        assert_eq!(batch.extra["object"], "batch");

        let content = assert_ok!(service.batch_result("file-9").await);
        assert_eq!(content, "raw-line\n");
    }
}
