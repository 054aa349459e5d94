// src/handlers/chat.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::chat::{ChatRequest, ChatResponse},
    services::completion::{CompletionBackend, SYSTEM_PROMPT},
};

/// Proxies a single chat message to the completion service.
///
/// The upstream conversation is always two turns: the fixed system
/// instruction plus the user's message. Upstream failures are collapsed
/// into one generic 500 body; the cause is only logged.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply from the completion service", body = ChatResponse),
        (status = 400, description = "Missing or empty message"),
        (status = 500, description = "Completion service failure")
    )
)]
pub async fn chat(
    State(completion): State<Arc<dyn CompletionBackend>>,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.validate().is_err() {
        return Err(AppError::BadRequest("Message is required".to_string()));
    }
    let message = payload.message.unwrap_or_default();

    let response = completion
        .complete(SYSTEM_PROMPT, &message)
        .await
        .map_err(|e| AppError::UpstreamFailure(e.to_string()))?;

    Ok(Json(ChatResponse { response }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use tower::ServiceExt;

    use crate::services::completion::CompletionError;

    struct EchoBackend;

    #[async_trait::async_trait]
    impl CompletionBackend for EchoBackend {
        async fn complete(
            &self,
            _system_prompt: &str,
            user_message: &str,
        ) -> Result<Option<String>, CompletionError> {
            Ok(Some(format!("echo: {}", user_message)))
        }
    }

    struct EmptyBackend;

    #[async_trait::async_trait]
    impl CompletionBackend for EmptyBackend {
        async fn complete(
            &self,
            _system_prompt: &str,
            _user_message: &str,
        ) -> Result<Option<String>, CompletionError> {
            Ok(None)
        }
    }

    struct FailingBackend;

    #[async_trait::async_trait]
    impl CompletionBackend for FailingBackend {
        async fn complete(
            &self,
            _system_prompt: &str,
            _user_message: &str,
        ) -> Result<Option<String>, CompletionError> {
            Err(CompletionError::Api {
                status: reqwest::StatusCode::TOO_MANY_REQUESTS,
                body: "quota exceeded".to_string(),
            })
        }
    }

    fn app(backend: Arc<dyn CompletionBackend>) -> Router {
        Router::new()
            .route("/api/chat", post(chat))
            .with_state(backend)
    }

    async fn send(app: Router, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn missing_message_returns_400() {
        let (status, body) = send(app(Arc::new(EchoBackend)), "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Message is required" }));
    }

    #[tokio::test]
    async fn empty_message_returns_400() {
        let (status, body) = send(app(Arc::new(EchoBackend)), r#"{"message":""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Message is required" }));
    }

    #[tokio::test]
    async fn forwards_message_and_returns_reply() {
        let (status, body) = send(app(Arc::new(EchoBackend)), r#"{"message":"hi"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "response": "echo: hi" }));
    }

    #[tokio::test]
    async fn missing_upstream_content_yields_empty_object() {
        let (status, body) = send(app(Arc::new(EmptyBackend)), r#"{"message":"hi"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({}));
    }

    #[tokio::test]
    async fn upstream_failure_returns_generic_500() {
        let (status, body) = send(app(Arc::new(FailingBackend)), r#"{"message":"hi"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        // Fixed body; provider details stay server-side
        assert_eq!(
            body,
            serde_json::json!({ "error": "Failed to process the request" })
        );
    }
}
