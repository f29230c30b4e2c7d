//! The web front end driven through the axum router.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{configured_client, stub_client};
use std::sync::Arc;
use tower::ServiceExt;
use tutor_qa::web::router;
use tutor_qa::{MapSource, TutorClient};

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn post_question(client: TutorClient, form: &'static str) -> (StatusCode, String) {
    let response = router(Arc::new(client))
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_text(response).await)
}

#[tokio::test]
async fn test_get_renders_empty_form() {
    let (client, _) = stub_client("unused");
    let response = router(Arc::new(client))
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<form method=\"post\" action=\"/\">"));
    assert!(!html.contains("class=\"error\""));
    assert!(!html.contains("id=\"result\""));
}

#[tokio::test]
async fn test_post_renders_answer_and_raw_payload() {
    let (client, _) = stub_client("Paris & Lyon.");

    let (status, html) = post_question(client, "question=What+is+the+capital+of+France%3F").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<p>What is the capital of France?</p>"));
    assert!(html.contains("<p>what is the capital of france</p>"));
    assert!(html.contains("Paris &amp; Lyon."));
    assert!(html.contains("\"stub\": true"));
}

#[tokio::test]
async fn test_post_with_empty_answer_still_shows_result() {
    let (client, prompts) = stub_client("");

    let (status, html) = post_question(client, "question=What+is+Rust%3F").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(prompts.lock().unwrap().len(), 1);
    assert!(html.contains("id=\"result\""));
    assert!(html.contains("<p>what is rust</p>"));
    assert!(html.contains("\"stub\": true"));
    assert!(!html.contains("class=\"error\""));
}

#[tokio::test]
async fn test_post_that_is_not_a_form_rerenders_page_with_error() {
    let (client, prompts) = stub_client("unused");
    let response = router(Arc::new(client))
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"question":"What is Rust?"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let html = body_text(response).await;
    assert!(html.contains("<form method=\"post\" action=\"/\">"));
    assert!(html.contains("<p class=\"error\">Please submit the question using the form.</p>"));
    assert!(prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_post_blank_question_shows_validation_error() {
    let (client, prompts) = stub_client("unused");

    let (status, html) = post_question(client, "question=+++").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<p class=\"error\">Please enter a question.</p>"));
    assert!(prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_post_without_field_is_treated_as_blank() {
    let (client, _) = stub_client("unused");

    let (_, html) = post_question(client, "other=value").await;

    assert!(html.contains("Please enter a question."));
}

#[tokio::test]
async fn test_post_provider_error_rerenders_form_with_message() {
    let client = configured_client(MapSource::new().with("LLM_PROVIDER", "groq"));

    let (status, html) = post_question(client, "question=Why+is+the+sky+blue%3F").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(
        "<p class=\"error\">Missing API key for provider 'groq'. Set GROQ_API_KEY.</p>"
    ));
    assert!(html.contains("required>Why is the sky blue?</textarea>"));
    assert!(!html.contains("id=\"result\""));
}
