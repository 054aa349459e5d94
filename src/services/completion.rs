// src/services/completion.rs

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// System instruction prepended to every proxied chat message.
pub const SYSTEM_PROMPT: &str = "You are a very helpful assistant.";

// Fixed generation parameters: deterministic-ish output, bounded length,
// no streaming, no stop sequence.
const TEMPERATURE: f64 = 0.6;
const MAX_TOKENS: u32 = 4096;
const TOP_P: f64 = 0.95;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from the completion service. Logged server-side only; the caller
/// always sees the generic failure body.
#[derive(Debug)]
pub enum CompletionError {
    Request(reqwest::Error),
    Api { status: StatusCode, body: String },
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Request(e) => write!(f, "completion request failed: {}", e),
            CompletionError::Api { status, body } => {
                write!(f, "completion API error {}: {}", status, body)
            }
        }
    }
}

impl std::error::Error for CompletionError {}

/// Opaque capability used by the chat handler: one message in, one optional
/// text reply out.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Option<String>, CompletionError>;
}

/// Groq chat-completions client (OpenAI-compatible wire format).
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl GroqClient {
    pub fn new(api_key: &str, api_base: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            model: model.to_string(),
        }
    }

    /// Pulls the first completion's text out of a chat-completions body.
    fn extract_content(body: &Value) -> Option<String> {
        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|s| s.to_string())
    }
}

#[async_trait]
impl CompletionBackend for GroqClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Option<String>, CompletionError> {
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_message }
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
            "top_p": TOP_P,
            "stream": false,
            "stop": null
        });

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(CompletionError::Request)?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status, body });
        }

        let body: Value = res.json().await.map_err(CompletionError::Request)?;
        Ok(Self::extract_content(&body))
    }
}
