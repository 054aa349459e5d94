// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// DTO for recording a single answer choice.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectAnswerRequest {
    pub question_index: usize,
    pub option_index: usize,
}

/// Snapshot of the quiz session, consumed by the progress indicator,
/// countdown display and navigation widgets.
///
/// Exactly one of `{is_active, score == None}` or
/// `{!is_active, score == Some(_)}` holds.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuizSnapshot {
    /// One slot per question; `null` means not answered yet.
    pub answers: Vec<Option<usize>>,
    pub answered_count: usize,
    pub total_questions: usize,
    pub is_active: bool,
    /// Final percentage (0-100), present once the session has finished.
    pub score: Option<f64>,
    pub remaining_seconds: u64,
    pub total_seconds: u64,
}

/// DTO for the result returned by submit.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuizResult {
    pub score: f64,
    pub correct_count: usize,
    pub total_questions: usize,
    pub finished_at: chrono::DateTime<chrono::Utc>,
    pub message: String,
}
