//! HTTP contract tests for [`JobClient`] against a mock workflow service.

use assert_matches::assert_matches;
use mockito::Matcher;
use profagent_client::{JobClient, JobClientError, JobService};
use profagent_core::job::JobPayload;
use profagent_core::status::{JobStatus, StepStatus};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: submit posts the payload and parses the initial snapshot
// ---------------------------------------------------------------------------

/// The payload is posted as JSON and the response becomes the first snapshot.
#[tokio::test]
async fn submit_posts_payload_and_returns_initial_state() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/agentic_workflow_async")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "goal": "g",
            "project_idea": "p",
            "profile_text": "t"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"job_id":"42","status":"pending","steps":[]}"#)
        .create_async()
        .await;

    let client = JobClient::new(server.url());
    let payload = JobPayload {
        goal: "g".into(),
        project_idea: Some("p".into()),
        profile_text: Some("t".into()),
    };

    let state = client.submit(&payload).await.unwrap();

    mock.assert_async().await;
    assert_eq!(state.job_id, "42");
    assert_eq!(state.status, JobStatus::Pending);
    assert!(state.steps.is_empty());
}

// ---------------------------------------------------------------------------
// Test: non-2xx submission surfaces the HTTP status
// ---------------------------------------------------------------------------

/// A non-2xx submit answer keeps its status and body.
#[tokio::test]
async fn submit_non_success_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/agentic_workflow_async")
        .with_status(422)
        .with_body("goal: field required")
        .create_async()
        .await;

    let client = JobClient::new(server.url());
    let err = client.submit(&JobPayload::new("")).await.unwrap_err();

    assert_matches!(err, JobClientError::Api { status: 422, ref body } if body == "goal: field required");
}

// ---------------------------------------------------------------------------
// Test: query fetches the status endpoint for the job id
// ---------------------------------------------------------------------------

/// Steps and artifacts come back verbatim from the status endpoint.
#[tokio::test]
async fn query_returns_full_snapshot() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/agentic_workflow_status/42")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "job_id": "42",
                "status": "running",
                "steps": [{"name": "retrieve_context", "status": "running"}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = JobClient::new(server.url());
    let state = client.query("42").await.unwrap();

    mock.assert_async().await;
    assert_eq!(state.status, JobStatus::Running);
    assert_eq!(state.steps[0].name, "retrieve_context");
    assert_eq!(state.steps[0].status, StepStatus::Running);
}

// ---------------------------------------------------------------------------
// Test: unknown job (404) is an API error
// ---------------------------------------------------------------------------

/// An unknown job id surfaces as a 404 API error.
#[tokio::test]
async fn query_not_found_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/agentic_workflow_status/missing")
        .with_status(404)
        .with_body(r#"{"detail":"Job not found"}"#)
        .create_async()
        .await;

    let client = JobClient::new(server.url());
    let err = client.query("missing").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
}

// ---------------------------------------------------------------------------
// Test: a 2xx body that is not a snapshot is a malformed-response error
// ---------------------------------------------------------------------------

/// A 200 with a body that is not a job snapshot is malformed.
#[tokio::test]
async fn query_unparseable_body_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/agentic_workflow_status/42")
        .with_status(200)
        .with_body(r#"{"status":"running"}"#)
        .create_async()
        .await;

    let client = JobClient::new(server.url());
    let err = client.query("42").await.unwrap_err();

    assert_matches!(err, JobClientError::Malformed(_));
}

// ---------------------------------------------------------------------------
// Test: an unreachable service is a request error
// ---------------------------------------------------------------------------

/// Nothing listening on the port is a transport failure.
#[tokio::test]
async fn unreachable_service_is_request_error() {
    let client = JobClient::new("http://127.0.0.1:1");
    let err = client.query("42").await.unwrap_err();

    assert_matches!(err, JobClientError::Request(_));
}
