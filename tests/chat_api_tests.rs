// tests/chat_api_tests.rs

use std::sync::Arc;

use axum::{Json, Router, http::StatusCode, routing::post};
use quiz_backend::quiz::{data, session::QuizSession};
use quiz_backend::routes;
use quiz_backend::services::completion::{CompletionBackend, GroqClient};
use quiz_backend::state::AppState;

/// Spawns a local stub standing in for the Groq API.
async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream stub");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn upstream_ok(reply: &'static str) -> Router {
    Router::new().route(
        "/chat/completions",
        post(move || async move {
            Json(serde_json::json!({
                "choices": [
                    { "message": { "role": "assistant", "content": reply } }
                ]
            }))
        }),
    )
}

fn upstream_error() -> Router {
    Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
    )
}

fn upstream_no_content() -> Router {
    Router::new().route(
        "/chat/completions",
        post(|| async { Json(serde_json::json!({ "choices": [] })) }),
    )
}

/// Spawns the app with the chat proxy pointed at the given upstream base.
async fn spawn_app(upstream_base: &str) -> String {
    let quiz = QuizSession::start(Arc::new(data::default_questions()), 300);
    let completion: Arc<dyn CompletionBackend> =
        Arc::new(GroqClient::new("test-key", upstream_base, "test-model"));

    let state = AppState { quiz, completion };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

#[tokio::test]
async fn missing_message_returns_400_with_fixed_body() {
    let upstream = spawn_upstream(upstream_ok("unused")).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chat", address))
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Message is required" }));
}

#[tokio::test]
async fn empty_message_returns_400_with_fixed_body() {
    let upstream = spawn_upstream(upstream_ok("unused")).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chat", address))
        .json(&serde_json::json!({ "message": "" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Message is required" }));
}

#[tokio::test]
async fn chat_returns_the_upstream_reply() {
    let upstream = spawn_upstream(upstream_ok("Hello there")).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chat", address))
        .json(&serde_json::json!({ "message": "hi" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "response": "Hello there" }));
}

#[tokio::test]
async fn upstream_without_content_yields_empty_object() {
    let upstream = spawn_upstream(upstream_no_content()).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chat", address))
        .json(&serde_json::json!({ "message": "hi" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert_eq!(body, "{}");
}

#[tokio::test]
async fn upstream_error_returns_generic_500() {
    let upstream = spawn_upstream(upstream_error()).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chat", address))
        .json(&serde_json::json!({ "message": "hi" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
    let body = response.text().await.unwrap();
    // Fixed body only; nothing from the provider leaks through
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&body).unwrap(),
        serde_json::json!({ "error": "Failed to process the request" })
    );
    assert!(!body.contains("upstream exploded"));
}

#[tokio::test]
async fn unreachable_upstream_returns_generic_500() {
    // Nothing listens on port 9 (discard)
    let address = spawn_app("http://127.0.0.1:9").await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chat", address))
        .json(&serde_json::json!({ "message": "hi" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "error": "Failed to process the request" })
    );
}
