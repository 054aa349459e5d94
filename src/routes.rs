// src/routes.rs

use std::sync::Arc;

use axum::{
    Json, Router,
    http::Method,
    routing::{get, post},
};
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{
    handlers::{chat, quiz},
    models::{
        chat::{ChatRequest, ChatResponse},
        question::PublicQuestion,
        quiz::{QuizResult, QuizSnapshot, SelectAnswerRequest},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        quiz::get_questions,
        quiz::get_state,
        quiz::select_answer,
        quiz::submit,
        quiz::reset,
        chat::chat,
    ),
    components(schemas(
        PublicQuestion,
        SelectAnswerRequest,
        QuizSnapshot,
        QuizResult,
        ChatRequest,
        ChatResponse,
    ))
)]
struct ApiDoc;

/// Assembles the main application router.
///
/// * Merges the quiz and chat sub-routers.
/// * Applies global middleware (Trace, CORS) and rate limiting on chat.
/// * Injects global state.
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    // One shared bucket: the chat route fronts a metered upstream
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(GlobalKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .unwrap(),
    );

    let quiz_routes = Router::new()
        .route("/questions", get(quiz::get_questions))
        .route("/state", get(quiz::get_state))
        .route("/answer", post(quiz::select_answer))
        .route("/submit", post(quiz::submit))
        .route("/reset", post(quiz::reset));

    let chat_routes = Router::new()
        .route("/api/chat", post(chat::chat))
        .layer(GovernorLayer::new(governor_conf));

    Router::new()
        .nest("/api/quiz", quiz_routes)
        .merge(chat_routes)
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
