//! Google Gemini adapter built on rig-core's Gemini client.
//!
//! rig owns the wire format (schema type names, `functionCall` and
//! `functionResponse` parts). This module only maps bridge turns to rig
//! messages and rig's reply back to a [`CompletionResult`].

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client as HttpClient;
use rig::{
    client::CompletionClient,
    completion::{CompletionModel, Message, ToolDefinition as RigToolDefinition},
    message::{AssistantContent, ToolResultContent, UserContent},
    providers::gemini,
    OneOrMany,
};
use secondbrain_core::settings::AiProvider;
use serde_json::json;
use std::time::Duration;

use super::{CompletionConfig, CompletionResult, ProviderAdapter};
use crate::error::AiError;
use crate::types::{Part, ToolCall, ToolDefinition, Turn, TurnRole};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

// ============================================================================
// Conversion
// ============================================================================

fn to_user_content(part: &Part) -> Option<UserContent> {
    match part {
        Part::Text(text) => Some(UserContent::text(text.clone())),
        // Gemini matches responses to calls by function name. The response
        // object travels as JSON text and is decoded back by the client.
        Part::FunctionResponse { name, response, .. } => Some(UserContent::tool_result(
            name.clone(),
            OneOrMany::one(ToolResultContent::text(response.to_string())),
        )),
        Part::FunctionCall(_) => None,
    }
}

fn to_assistant_content(part: &Part) -> Option<AssistantContent> {
    match part {
        Part::Text(text) => Some(AssistantContent::text(text.clone())),
        Part::FunctionCall(call) => Some(AssistantContent::tool_call(
            call.id.clone().unwrap_or_else(|| call.name.clone()),
            call.name.clone(),
            call.arguments.clone(),
        )),
        Part::FunctionResponse { .. } => None,
    }
}

/// Maps bridge turns to rig messages. Turns left with no content are dropped.
fn to_rig_messages(turns: &[Turn]) -> Vec<Message> {
    turns
        .iter()
        .filter_map(|turn| match turn.role {
            TurnRole::User => {
                let content: Vec<UserContent> =
                    turn.parts.iter().filter_map(to_user_content).collect();
                OneOrMany::many(content)
                    .ok()
                    .map(|content| Message::User { content })
            }
            TurnRole::Model => {
                let content: Vec<AssistantContent> =
                    turn.parts.iter().filter_map(to_assistant_content).collect();
                OneOrMany::many(content)
                    .ok()
                    .map(|content| Message::Assistant { id: None, content })
            }
        })
        .collect()
}

fn to_rig_tools(tools: &[ToolDefinition]) -> Vec<RigToolDefinition> {
    tools
        .iter()
        .map(|t| RigToolDefinition {
            name: t.name.clone(),
            description: t.description.clone(),
            parameters: t.parameters.clone(),
        })
        .collect()
}

/// Concatenates reply text and collects tool calls in order.
fn from_rig_choice(choice: impl IntoIterator<Item = AssistantContent>) -> CompletionResult {
    let mut result = CompletionResult::default();
    let mut text = String::new();

    for content in choice {
        match content {
            AssistantContent::Text(t) => text.push_str(&t.text),
            AssistantContent::ToolCall(call) => {
                let arguments = if call.function.arguments.is_null() {
                    json!({})
                } else {
                    call.function.arguments
                };
                result.tool_calls.push(ToolCall {
                    id: Some(call.id),
                    name: call.function.name,
                    arguments,
                });
            }
            _ => {}
        }
    }
    if !text.is_empty() {
        result.text = Some(text);
    }
    result
}

// ============================================================================
// Adapter
// ============================================================================

pub struct GeminiProvider {
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiProvider {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

fn create_gemini_client(
    api_key: &str,
    base_url: &str,
) -> Result<gemini::Client<HttpClient>, AiError> {
    gemini::Client::builder()
        .api_key(api_key)
        .base_url(base_url)
        .build()
        .map_err(|e| AiError::provider(e.to_string()))
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    fn provider_id(&self) -> AiProvider {
        AiProvider::Gemini
    }

    async fn complete(&self, config: CompletionConfig) -> Result<CompletionResult, AiError> {
        let mut messages = to_rig_messages(&config.contents);
        let prompt = messages
            .pop()
            .ok_or_else(|| AiError::provider("Gemini request has no contents"))?;
        debug!(
            "Gemini request: model={} turns={} tools={}",
            config.model_id,
            messages.len() + 1,
            config.tools.len()
        );

        let client = create_gemini_client(&config.api_key, &self.base_url)?;
        let model = client.completion_model(config.model_id.as_str());
        let mut request = model
            .completion_request(prompt)
            .preamble(config.system_prompt.clone())
            .messages(messages)
            .tools(to_rig_tools(&config.tools));
        if let Some(temperature) = config.temperature {
            request = request.temperature(f64::from(temperature));
        }

        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request.send())
                .await
                .map_err(|_| {
                    AiError::provider(format!("Gemini request timed out after {:?}", limit))
                })?,
            None => request.send().await,
        }
        .map_err(|e| {
            warn!("Gemini request failed: {}", e);
            AiError::provider(format!("Gemini request failed: {}", e))
        })?;

        Ok(from_rig_choice(response.choice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool_round() -> Vec<Turn> {
        vec![
            Turn::user_text("hi"),
            Turn {
                role: TurnRole::Model,
                parts: vec![
                    Part::Text("On it.".to_string()),
                    Part::FunctionCall(ToolCall {
                        id: Some("c1".to_string()),
                        name: "addNote".to_string(),
                        arguments: json!({"title": "x"}),
                    }),
                ],
            },
            Turn {
                role: TurnRole::User,
                parts: vec![Part::FunctionResponse {
                    id: Some("c1".to_string()),
                    name: "addNote".to_string(),
                    response: json!({"result": "Note created."}),
                }],
            },
        ]
    }

    #[test]
    fn test_turns_map_to_rig_messages() {
        let messages = to_rig_messages(&tool_round());
        assert_eq!(messages.len(), 3);

        match &messages[1] {
            Message::Assistant { content, .. } => {
                let calls: Vec<&str> = content
                    .iter()
                    .filter_map(|c| match c {
                        AssistantContent::ToolCall(call) => Some(call.function.name.as_str()),
                        _ => None,
                    })
                    .collect();
                assert_eq!(calls, vec!["addNote"]);
                assert_eq!(content.len(), 2);
            }
            other => panic!("expected assistant message, got {:?}", other),
        }

        match &messages[2] {
            Message::User { content } => match content.first() {
                UserContent::ToolResult(result) => {
                    assert_eq!(result.id, "addNote");
                    match result.content.first() {
                        ToolResultContent::Text(t) => {
                            let decoded: serde_json::Value = serde_json::from_str(&t.text).unwrap();
                            assert_eq!(decoded["result"], "Note created.");
                        }
                        other => panic!("expected text result, got {:?}", other),
                    }
                }
                other => panic!("expected tool result, got {:?}", other),
            },
            other => panic!("expected user message, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_turns_are_dropped() {
        let turns = vec![
            Turn::user_text("hi"),
            Turn {
                role: TurnRole::Model,
                parts: Vec::new(),
            },
        ];
        assert_eq!(to_rig_messages(&turns).len(), 1);
    }

    #[test]
    fn test_tool_definitions_pass_through() {
        let tools = to_rig_tools(&[ToolDefinition {
            name: "addHabit".to_string(),
            description: "Create a habit.".to_string(),
            parameters: json!({"type": "object", "properties": {"title": {"type": "string"}}}),
        }]);
        assert_eq!(tools[0].name, "addHabit");
        assert_eq!(tools[0].parameters["properties"]["title"]["type"], "string");
    }

    #[test]
    fn test_reply_text_and_calls() {
        let result = from_rig_choice(vec![
            AssistantContent::text("Sure. "),
            AssistantContent::tool_call("addHabit", "addHabit", json!({"title": "Read"})),
            AssistantContent::text("Adding it."),
            AssistantContent::tool_call("c2", "addNote", serde_json::Value::Null),
        ]);

        assert_eq!(result.text.as_deref(), Some("Sure. Adding it."));
        assert_eq!(result.tool_calls.len(), 2);
        assert_eq!(result.tool_calls[0].arguments["title"], "Read");
        assert_eq!(result.tool_calls[1].id.as_deref(), Some("c2"));
        assert_eq!(result.tool_calls[1].arguments, json!({}));
    }

    #[test]
    fn test_empty_choice() {
        assert_eq!(from_rig_choice(Vec::new()), CompletionResult::default());
    }
}
