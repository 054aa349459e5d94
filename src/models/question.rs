// src/models/question.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single multiple-choice quiz item.
/// The full list is loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub id: i64,

    /// The text of the question.
    pub question: String,

    /// Ordered answer options (at least two).
    pub options: Vec<String>,

    /// Index into `options` of the correct choice.
    pub correct_answer: usize,
}

/// DTO for sending a question to the client (excludes the correct answer).
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicQuestion {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            question: q.question.clone(),
            options: q.options.clone(),
        }
    }
}
