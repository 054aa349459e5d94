// src/handlers/quiz.rs

use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;

use crate::{
    error::AppError,
    models::{
        question::PublicQuestion,
        quiz::{QuizResult, QuizSnapshot, SelectAnswerRequest},
    },
    quiz::session::QuizSession,
};

/// Returns the question list with correct answers stripped.
///
/// The client renders one question at a time and navigates freely; the
/// answer key never leaves the server.
#[utoipa::path(
    get,
    path = "/api/quiz/questions",
    responses(
        (status = 200, description = "Question list without answer keys", body = [PublicQuestion])
    )
)]
pub async fn get_questions(
    State(session): State<QuizSession>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(session.questions()))
}

/// Current session snapshot: per-question answers, progress counts,
/// countdown and completion state.
#[utoipa::path(
    get,
    path = "/api/quiz/state",
    responses(
        (status = 200, description = "Current quiz session snapshot", body = QuizSnapshot)
    )
)]
pub async fn get_state(
    State(session): State<QuizSession>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(session.snapshot()))
}

/// Records one answer choice, overwriting any prior choice for that
/// question.
#[utoipa::path(
    post,
    path = "/api/quiz/answer",
    request_body = SelectAnswerRequest,
    responses(
        (status = 200, description = "Updated session snapshot", body = QuizSnapshot),
        (status = 400, description = "Question or option index out of range"),
        (status = 409, description = "Quiz is not active")
    )
)]
pub async fn select_answer(
    State(session): State<QuizSession>,
    Json(payload): Json<SelectAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = session.select_answer(payload.question_index, payload.option_index)?;
    Ok(Json(snapshot))
}

/// Finishes the quiz and computes the final score.
/// Requires every question to be answered; the timer path is the only way
/// to finish with unanswered questions.
#[utoipa::path(
    post,
    path = "/api/quiz/submit",
    responses(
        (status = 200, description = "Final score", body = QuizResult),
        (status = 400, description = "Not all questions answered"),
        (status = 409, description = "Quiz already finished")
    )
)]
pub async fn submit(State(session): State<QuizSession>) -> Result<impl IntoResponse, AppError> {
    let report = session.submit()?;
    tracing::info!("Quiz submitted, final score {:.1}%", report.score);

    Ok(Json(QuizResult {
        score: report.score,
        correct_count: report.correct_count,
        total_questions: report.total_questions,
        finished_at: Utc::now(),
        message: "Quiz submitted successfully".to_string(),
    }))
}

/// Starts a fresh attempt. Usable at any time.
#[utoipa::path(
    post,
    path = "/api/quiz/reset",
    responses(
        (status = 200, description = "Fresh session snapshot", body = QuizSnapshot)
    )
)]
pub async fn reset(State(session): State<QuizSession>) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Quiz reset");
    Ok(Json(session.reset()))
}
