// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::quiz::session::QuizSession;
use crate::services::completion::CompletionBackend;

#[derive(Clone)]
pub struct AppState {
    pub quiz: QuizSession,
    pub completion: Arc<dyn CompletionBackend>,
}

impl FromRef<AppState> for QuizSession {
    fn from_ref(state: &AppState) -> Self {
        state.quiz.clone()
    }
}

impl FromRef<AppState> for Arc<dyn CompletionBackend> {
    fn from_ref(state: &AppState) -> Self {
        state.completion.clone()
    }
}
