// src/models/chat.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// DTO for the chat proxy request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChatRequest {
    /// The user's message. Required and non-empty.
    #[validate(
        required(message = "Message is required"),
        length(min = 1, message = "Message is required")
    )]
    pub message: Option<String>,
}

/// DTO for the chat proxy reply.
/// `response` is omitted when the provider returns no text content.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}
