use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Every filesystem location lives here and is handed to [`crate::storage::Storage`]
/// at startup; no module reads a global path constant.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key. Optional: without it the app still serves forms and
    /// templates, but AI-backed endpoints fail with a configuration error.
    pub gemini_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Timeout applied to each AI completion call. No retries.
    pub llm_timeout: Duration,
    /// Root for submissions, generated RFPs, and vendor responses.
    pub data_dir: PathBuf,
    /// Directory holding form schema JSON files.
    pub schema_dir: PathBuf,
    /// Directory holding RFP placeholder templates.
    pub template_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout: Duration::from_secs(
                std::env::var("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "120".to_string())
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a number of seconds")?,
            ),
            data_dir: env_path("DATA_DIR", "data"),
            schema_dir: env_path("SCHEMA_DIR", "schema"),
            template_dir: env_path("TEMPLATE_DIR", "templates/rfp_templates"),
        })
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
