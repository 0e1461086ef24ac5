//! Model provider adapters.
//!
//! The bridge talks to providers through [`ProviderAdapter`] so the tool loop
//! never depends on a particular HTTP API. Only Gemini is wired up; the other
//! [`AiProvider`] values are accepted in settings but have no adapter.

mod gemini;

pub use gemini::{GeminiProvider, DEFAULT_GEMINI_BASE_URL};

use async_trait::async_trait;
use secondbrain_core::settings::AiProvider;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AiError;
use crate::types::{ToolCall, ToolDefinition, Turn};

// ============================================================================
// Request / Response
// ============================================================================

/// Everything a provider needs for one model round-trip.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub model_id: String,
    pub api_key: String,
    pub system_prompt: String,
    /// Alternating turns, starting and ending on a user turn.
    pub contents: Vec<Turn>,
    pub tools: Vec<ToolDefinition>,
    pub temperature: Option<f32>,
}

/// What the model answered: text, tool calls, or both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionResult {
    pub text: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

impl CompletionResult {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            tool_calls: Vec::new(),
        }
    }

    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            text: None,
            tool_calls: calls,
        }
    }

    /// Non-blank reply text, if any.
    pub fn reply_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }
}

// ============================================================================
// Adapter trait
// ============================================================================

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Provider this adapter serves.
    fn provider_id(&self) -> AiProvider;

    /// Whether the provider can call tools.
    fn supports_tools(&self) -> bool {
        true
    }

    async fn complete(&self, config: CompletionConfig) -> Result<CompletionResult, AiError>;
}

/// Adapters keyed by provider.
#[derive(Default)]
pub struct ProviderRegistry {
    adapters: HashMap<AiProvider, Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the Gemini adapter against the given endpoint.
    pub fn with_gemini(base_url: &str, timeout: Option<std::time::Duration>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(GeminiProvider::new(base_url, timeout)));
        registry
    }

    pub fn register(&mut self, adapter: Arc<dyn ProviderAdapter>) {
        self.adapters.insert(adapter.provider_id(), adapter);
    }

    pub fn get(&self, provider: AiProvider) -> Option<Arc<dyn ProviderAdapter>> {
        self.adapters.get(&provider).cloned()
    }

    pub fn supports(&self, provider: AiProvider) -> bool {
        self.adapters.contains_key(&provider)
    }
}

// ============================================================================
// Stub provider
// ============================================================================

#[cfg(test)]
pub mod stub {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays scripted results and records every request it receives.
    pub struct StubProvider {
        provider: AiProvider,
        responses: Mutex<VecDeque<Result<CompletionResult, AiError>>>,
        requests: Mutex<Vec<CompletionConfig>>,
    }

    impl StubProvider {
        pub fn new(responses: Vec<Result<CompletionResult, AiError>>) -> Self {
            Self {
                provider: AiProvider::Gemini,
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<CompletionConfig> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProviderAdapter for StubProvider {
        fn provider_id(&self) -> AiProvider {
            self.provider
        }

        async fn complete(&self, config: CompletionConfig) -> Result<CompletionResult, AiError> {
            self.requests.lock().unwrap().push(config);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AiError::provider("stub exhausted")))
        }
    }
}
