use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::CompletionClient;
use crate::storage::Storage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    /// AI completion backend. `None` when no API key is configured; the
    /// app still serves forms and templates, but AI endpoints error.
    pub llm: Option<Arc<dyn CompletionClient>>,
    pub config: Config,
}

impl AppState {
    /// The AI backend, or the not-configured error for AI-only endpoints.
    pub fn llm(&self) -> Result<&Arc<dyn CompletionClient>, AppError> {
        self.llm.as_ref().ok_or(AppError::LlmUnavailable)
    }
}
