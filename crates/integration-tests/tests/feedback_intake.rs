//! Integration tests for the feedback intake endpoint.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use feedback_relay_integration_tests::{CHANNEL, FakeSlack, TestApp, json_body, text_body};
use serde_json::json;

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_missing_name_is_rejected_without_posting() {
    let app = TestApp::new();

    let (status, body) = app
        .submit_feedback(&json!({"userEmail": "ann@example.com", "userMessage": "Hello"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .contains("userName")
    );
    assert!(app.slack.messages().is_empty());
}

#[tokio::test]
async fn test_missing_message_is_rejected_without_posting() {
    let app = TestApp::new();

    let (status, body) = app.submit_feedback(&json!({"userName": "Ann"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .contains("userMessage")
    );
    assert!(app.slack.messages().is_empty());
}

#[tokio::test]
async fn test_whitespace_only_fields_count_as_missing() {
    let app = TestApp::new();

    let (status, _) = app
        .submit_feedback(&json!({"userName": "   ", "userMessage": "\n\t"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.slack.messages().is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_rejected() {
    let app = TestApp::new();

    let request = Request::post("/api/submit-feedback")
        .header("content-type", "application/json")
        .body(Body::from("userName=Ann"))
        .expect("request");
    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["success"], false);
    assert!(app.slack.messages().is_empty());
}

// =============================================================================
// Posting
// =============================================================================

#[tokio::test]
async fn test_valid_submission_posts_one_message() {
    let app = TestApp::new();

    let (status, body) = app
        .submit_feedback(&json!({
            "userName": "Ann Lee",
            "userEmail": "ann@example.com",
            "userMessage": "Great job",
            "password": "ignored"
        }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Feedback submitted successfully!");

    let message = app.slack.single_message();
    assert_eq!(message.channel, CHANNEL);
    assert_eq!(body["ts"], message.ts.as_str());

    let section = message.blocks_of("section")[0]["text"]["text"]
        .as_str()
        .expect("section text")
        .to_string();
    assert!(section.contains("Ann Lee"));
    assert!(section.contains("ann@example.com"));
    assert!(section.contains("Great job"));
    assert!(!message.blocks.iter().any(|b| b.to_string().contains("ignored")));
}

#[tokio::test]
async fn test_each_submission_is_a_separate_message() {
    let app = TestApp::new();
    let feedback = json!({"userName": "Ann", "userMessage": "Same text"});

    let (_, first) = app.submit_feedback(&feedback).await;
    let (_, second) = app.submit_feedback(&feedback).await;

    assert_eq!(app.slack.messages().len(), 2);
    assert_ne!(first["ts"], second["ts"]);
}

#[tokio::test]
async fn test_slack_failure_returns_generic_500() {
    let app = TestApp::with_slack(FakeSlack::failing_posts(), None);

    let (status, body) = app
        .submit_feedback(&json!({"userName": "Ann", "userMessage": "Hi"}))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Failed to send feedback. Please try again later."
    );
    assert!(!body.to_string().contains("not_in_channel"));
}

// =============================================================================
// Ambient routes
// =============================================================================

#[tokio::test]
async fn test_root_liveness_text() {
    let app = TestApp::new();

    let response = app
        .send(Request::get("/").body(Body::empty()).expect("request"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        text_body(response).await,
        "Hello from the Feedback Server! The server is alive."
    );
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app
        .send(Request::get("/health").body(Body::empty()).expect("request"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, "ok");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = TestApp::new();

    let response = app
        .send(
            Request::get("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .expect("request"),
        )
        .await;

    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-42")
    );
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = TestApp::new();

    let response = app
        .send(
            Request::options("/api/submit-feedback")
                .header("origin", "https://forms.example.com")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .expect("request"),
        )
        .await;

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
