//! Chat service: one user message in, one model message out.
//!
//! `send_message` appends the user's message, runs the model/tool loop and
//! appends the reply. Every failure ends up as a chat message; nothing is
//! returned as an error to the caller.

use log::{debug, error, info, warn};
use secondbrain_core::chat::Message;
use secondbrain_core::state::AppState;
use secondbrain_core::utils::new_id;
use secondbrain_core::{Action, Store};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::context::build_system_prompt;
use crate::env::{AiEnvironment, DEFAULT_GEMINI_MODEL};
use crate::error::AiError;
use crate::protocol::build_contents;
use crate::providers::{CompletionConfig, ProviderAdapter, ProviderRegistry};
use crate::tools::constants::TOOL_NOT_RECOGNIZED;
use crate::tools::{ToolContext, ToolRegistry};
use crate::types::{ChatConfig, Part, ToolCall, Turn, TurnRole};

/// Shown when the configured provider has no adapter.
pub const UNSUPPORTED_PROVIDER_MESSAGE: &str =
    "Please switch to Google Gemini in Settings to use full AI capabilities.";

/// Shown when no credential is configured.
pub const MISSING_KEY_MESSAGE: &str =
    "The assistant is offline: no Gemini API key is configured. Set GEMINI_API_KEY or add a key in Settings.";

/// Shown for any transport or API failure.
pub const CONNECTION_ERROR_MESSAGE: &str = "I encountered a connection error. Please try again.";

/// Reply when the model answered with neither text nor tool calls.
const EMPTY_REPLY: &str = "Processed.";
/// Reply after tool calls when the model added no text.
const TOOLS_DONE_REPLY: &str = "Done.";

/// Clears the busy flag when a round-trip ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Provider and credential resolved for one request.
struct ReadyProvider {
    adapter: Arc<dyn ProviderAdapter>,
    api_key: String,
    model_id: String,
}

pub struct ChatService<E: AiEnvironment + 'static> {
    store: Arc<Store>,
    providers: ProviderRegistry,
    tools: ToolRegistry,
    env: Arc<E>,
    config: ChatConfig,
    busy: AtomicBool,
}

impl<E: AiEnvironment + 'static> ChatService<E> {
    pub fn new(
        store: Arc<Store>,
        providers: ProviderRegistry,
        tools: ToolRegistry,
        env: Arc<E>,
        config: ChatConfig,
    ) -> Self {
        Self {
            store,
            providers,
            tools,
            env,
            config,
            busy: AtomicBool::new(false),
        }
    }

    /// True when a message sent now would reach the model.
    pub fn is_ready(&self) -> bool {
        self.readiness(&self.store.snapshot()).is_ok()
    }

    /// True while a message is being processed.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Tool names offered to the model.
    pub fn list_tools(&self) -> Vec<String> {
        self.tools.list_names()
    }

    /// Sends `text` and returns the reply appended to the chat history.
    ///
    /// Returns `None` without touching state when `text` is blank or another
    /// message is still in flight.
    pub async fn send_message(&self, text: &str) -> Option<Message> {
        if text.trim().is_empty() {
            return None;
        }
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Ignoring message while a request is in flight");
            return None;
        }
        let _guard = BusyGuard(&self.busy);

        // History is taken before the new message is appended.
        let before = self.store.snapshot();
        self.store.dispatch(Action::AddMessage(Message::user(
            new_id(),
            text,
            self.now_ms(),
        )));

        let reply = match self.readiness(&before) {
            Err(e @ AiError::UnsupportedProvider(_)) => {
                info!("{}", e);
                self.error_message(UNSUPPORTED_PROVIDER_MESSAGE)
            }
            Err(e) => {
                warn!("{}", e);
                self.error_message(MISSING_KEY_MESSAGE)
            }
            Ok(ready) => {
                let completion = CompletionConfig {
                    model_id: ready.model_id,
                    api_key: ready.api_key,
                    system_prompt: build_system_prompt(
                        &before,
                        &self.config,
                        self.env.now().date_naive(),
                    ),
                    contents: build_contents(&before.chat_history, text),
                    tools: if ready.adapter.supports_tools() {
                        self.tools.get_definitions()
                    } else {
                        Vec::new()
                    },
                    temperature: self.config.temperature,
                };
                match self.run_conversation(ready.adapter.as_ref(), completion).await {
                    Ok(reply) => Message::model(new_id(), reply, self.now_ms()),
                    Err(e) => {
                        error!("Chat round-trip failed [{}]: {}", e.code(), e);
                        self.error_message(CONNECTION_ERROR_MESSAGE)
                    }
                }
            }
        };

        self.store.dispatch(Action::AddMessage(reply.clone()));
        Some(reply)
    }

    fn readiness(&self, state: &AppState) -> Result<ReadyProvider, AiError> {
        let provider = state.settings.provider;
        let adapter = self
            .providers
            .get(provider)
            .ok_or(AiError::UnsupportedProvider(provider))?;

        let stored = state.settings.api_keys.for_provider(provider).trim();
        let api_key = if stored.is_empty() {
            self.env.get_api_key(provider)
        } else {
            Some(stored.to_string())
        };
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(AiError::MissingApiKey(provider))?;

        let model_id = self
            .env
            .get_model(provider)
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        Ok(ReadyProvider {
            adapter,
            api_key,
            model_id,
        })
    }

    /// Model/tool loop. Tool calls in one model turn run in order, each
    /// against the state left by the previous one.
    ///
    /// Once the round budget is spent, the model gets one last request with
    /// no tools offered so it can report on the final results.
    async fn run_conversation(
        &self,
        adapter: &dyn ProviderAdapter,
        mut completion: CompletionConfig,
    ) -> Result<String, AiError> {
        let mut last_text: Option<String> = None;

        for round in 0..self.config.max_tool_rounds.max(1) {
            let result = adapter.complete(completion.clone()).await?;
            let text = result.reply_text().map(str::to_string);

            if result.tool_calls.is_empty() {
                let fallback = if round == 0 {
                    EMPTY_REPLY
                } else {
                    TOOLS_DONE_REPLY
                };
                return Ok(text.unwrap_or_else(|| fallback.to_string()));
            }
            if text.is_some() {
                last_text = text.clone();
            }

            let mut call_parts: Vec<Part> = Vec::with_capacity(result.tool_calls.len() + 1);
            if let Some(t) = text {
                call_parts.push(Part::Text(t));
            }
            let mut response_parts: Vec<Part> = Vec::with_capacity(result.tool_calls.len());
            for call in result.tool_calls {
                let output = self.run_tool(&call).await;
                response_parts.push(Part::FunctionResponse {
                    id: call.id.clone(),
                    name: call.name.clone(),
                    response: json!({ "result": output }),
                });
                call_parts.push(Part::FunctionCall(call));
            }

            completion.contents.push(Turn {
                role: TurnRole::Model,
                parts: call_parts,
            });
            completion.contents.push(Turn {
                role: TurnRole::User,
                parts: response_parts,
            });
        }

        warn!(
            "Tool round budget of {} exhausted",
            self.config.max_tool_rounds
        );
        completion.tools.clear();
        let result = adapter.complete(completion).await?;
        if !result.tool_calls.is_empty() {
            warn!(
                "Ignoring {} tool calls after the round budget",
                result.tool_calls.len()
            );
        }
        Ok(result
            .reply_text()
            .map(str::to_string)
            .or(last_text)
            .unwrap_or_else(|| TOOLS_DONE_REPLY.to_string()))
    }

    async fn run_tool(&self, call: &ToolCall) -> String {
        debug!("Tool call: {}", call.name);
        let ctx = ToolContext::new(self.store.clone(), self.env.now());
        match self
            .tools
            .execute(&call.name, call.arguments.clone(), &ctx)
            .await
        {
            Ok(output) => output,
            Err(AiError::ToolNotFound(name)) => {
                warn!("Model requested unknown tool {}", name);
                TOOL_NOT_RECOGNIZED.to_string()
            }
            Err(e) => {
                debug!("Tool {} rejected arguments: {}", call.name, e);
                format!("Error: {}", e)
            }
        }
    }

    fn error_message(&self, text: &str) -> Message {
        Message::model_error(new_id(), text, self.now_ms())
    }

    fn now_ms(&self) -> i64 {
        self.env.now().timestamp_millis()
    }
}
