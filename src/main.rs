// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use quiz_backend::config::Config;
use quiz_backend::quiz::{data, session::QuizSession};
use quiz_backend::routes;
use quiz_backend::services::completion::{CompletionBackend, GroqClient};
use quiz_backend::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Load the static question list
    let questions = data::load_questions(config.quiz_data_path.as_deref())
        .expect("Failed to load quiz questions");
    tracing::info!("Loaded {} quiz questions", questions.len());

    // Start the quiz session with its countdown running
    let quiz = QuizSession::start(Arc::new(questions), config.quiz_duration_secs);

    let completion: Arc<dyn CompletionBackend> = Arc::new(GroqClient::new(
        &config.groq_api_key,
        &config.groq_api_base,
        &config.groq_model,
    ));

    let state = AppState { quiz, completion };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}
