//! HTTP tests against a mock backend.

use std::time::Duration;

use httpmock::prelude::*;
use nlpassist_cli::app::{error_text, App, ExchangeStatus};
use nlpassist_cli::client::{AskClient, AskError, HttpBackend};
use nlpassist_cli::message::{MessageKind, Role};
use serde_json::json;
use std::sync::Arc;

async fn wait_for_response(app: &mut App) {
    for _ in 0..400 {
        if app.process_response() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("no response rendered");
}

#[tokio::test]
async fn test_ask_posts_question_and_user_id() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/ask")
                .header("content-type", "application/json")
                .json_body(json!({ "question": "What is the attendance policy?", "user_id": "sufyan_student" }));
            then.status(200).json_body(json!({
                "answer": "Minimum 80% attendance is required.",
                "sources": ["Official University Database"],
                "confidence": 0.92,
                "response_time": 0.3,
                "cached": false,
                "retrieved_chunks": []
            }));
        })
        .await;

    let client = AskClient::http(server.url("/api/ask"), "sufyan_student");
    let response = client.ask("What is the attendance policy?").await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.answer, "Minimum 80% attendance is required.");
    assert_eq!(response.sources, vec!["Official University Database"]);
    assert_eq!(response.confidence, Some(0.92));
}

#[tokio::test]
async fn test_ask_accepts_answer_only_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/ask");
            then.status(200).json_body(json!({ "answer": "Yes." }));
        })
        .await;

    let client = AskClient::http(server.url("/api/ask"), "student");
    let response = client.ask("Hostel?").await.unwrap();
    assert_eq!(response.answer, "Yes.");
    assert!(!response.cached);
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/ask");
            then.status(500)
                .json_body(json!({ "detail": "Backend Error: model not loaded" }));
        })
        .await;

    let client = AskClient::http(server.url("/api/ask"), "student");
    match client.ask("Fees?").await {
        Err(AskError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("model not loaded"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found_is_an_error() {
    let server = MockServer::start_async().await;

    let client = AskClient::http(server.url("/wrong/path"), "student");
    let result = client.ask("Fees?").await;
    assert!(matches!(result, Err(AskError::Status { status: 404, .. })));
}

#[tokio::test]
async fn test_body_without_answer_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/ask");
            then.status(200).body("<html>gateway</html>");
        })
        .await;

    let client = AskClient::http(server.url("/api/ask"), "student");
    let result = client.ask("Fees?").await;
    assert!(matches!(result, Err(AskError::Decode(_))));
}

#[tokio::test]
async fn test_connection_refused_is_a_network_error() {
    let client = AskClient::http("http://127.0.0.1:1/api/ask", "student");
    let result = client.ask("anyone there?").await;
    assert!(matches!(result, Err(AskError::Network(_))));
}

#[tokio::test]
async fn test_timeout_is_a_network_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/ask");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({ "answer": "late" }));
        })
        .await;

    let backend =
        HttpBackend::with_timeout(server.url("/api/ask"), Some(Duration::from_millis(50))).unwrap();
    let client = AskClient::new(Arc::new(backend), "student");
    let result = client.ask("quick?").await;
    assert_eq!(result, Err(AskError::Network("request timed out".to_string())));
}

#[tokio::test]
async fn test_app_exchange_over_http() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/ask")
                .json_body(json!({ "question": "When is convocation?", "user_id": "student" }));
            then.status(200)
                .json_body(json!({ "answer": "Usually in December." }));
        })
        .await;

    let mut app = App::new(AskClient::http(server.url("/api/ask"), "student"));
    for c in "When is convocation?".chars() {
        app.handle_char(c);
    }
    app.submit_message();
    wait_for_response(&mut app).await;

    mock.assert_async().await;
    assert_eq!(app.status, ExchangeStatus::Rendered { failed: false });
    let last = app.chat.messages.last().unwrap();
    assert_eq!(last.role, Role::Bot);
    assert_eq!(last.content, "Usually in December.");
}

#[tokio::test]
async fn test_app_renders_error_when_backend_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/ask");
            then.status(503);
        })
        .await;

    let endpoint = server.url("/api/ask");
    let mut app = App::new(AskClient::http(endpoint.clone(), "student"));
    for c in "hello".chars() {
        app.handle_char(c);
    }
    app.submit_message();
    wait_for_response(&mut app).await;

    assert_eq!(app.status, ExchangeStatus::Rendered { failed: true });
    let last = app.chat.messages.last().unwrap();
    assert_eq!(last.kind, MessageKind::Error);
    assert_eq!(last.content, error_text(&endpoint));
    // Question stays in history above the error
    assert_eq!(app.chat.messages[app.chat.messages.len() - 2].content, "hello");
}
