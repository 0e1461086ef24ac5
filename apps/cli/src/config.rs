use std::time::Duration;

use secondbrain_ai::env::DEFAULT_GEMINI_MODEL;
use secondbrain_ai::providers::DEFAULT_GEMINI_BASE_URL;

pub struct Config {
    pub db_path: String,
    pub log_format: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let db_path =
            std::env::var("SB_DB_PATH").unwrap_or_else(|_| "./data/secondbrain.db".into());
        let log_format = std::env::var("SB_LOG_FORMAT").unwrap_or_else(|_| "text".into());
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|k| !k.trim().is_empty());
        let gemini_model =
            std::env::var("SB_GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.into());
        let gemini_base_url = std::env::var("SB_GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.into());
        let timeout_ms: u64 = std::env::var("SB_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "60000".into())
            .parse()
            .unwrap_or(60000);
        Self {
            db_path,
            log_format,
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            request_timeout: Duration::from_millis(timeout_ms),
        }
    }
}
