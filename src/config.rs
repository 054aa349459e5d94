// src/config.rs

use std::env;

use dotenvy::dotenv;
use url::Url;

/// Quiz duration when QUIZ_DURATION_SECS is not set (5 minutes).
pub const DEFAULT_QUIZ_DURATION_SECS: u64 = 300;

pub const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "qwen-2.5-32b";

#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_api_base: String,
    pub groq_model: String,
    pub quiz_duration_secs: u64,
    pub quiz_data_path: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let groq_api_key = env::var("GROQ_API_KEY")
            .expect("GROQ_API_KEY must be set");

        let groq_api_base = env::var("GROQ_API_BASE")
            .unwrap_or_else(|_| DEFAULT_GROQ_API_BASE.to_string());
        Url::parse(&groq_api_base)
            .expect("GROQ_API_BASE must be a valid URL");

        let groq_model = env::var("GROQ_MODEL")
            .unwrap_or_else(|_| DEFAULT_GROQ_MODEL.to_string());

        let quiz_duration_secs = match env::var("QUIZ_DURATION_SECS") {
            Ok(raw) => raw
                .parse()
                .expect("QUIZ_DURATION_SECS must be a positive integer"),
            Err(_) => DEFAULT_QUIZ_DURATION_SECS,
        };

        let quiz_data_path = env::var("QUIZ_DATA_PATH").ok();

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            groq_api_key,
            groq_api_base,
            groq_model,
            quiz_duration_secs,
            quiz_data_path,
            rust_log,
        }
    }
}
