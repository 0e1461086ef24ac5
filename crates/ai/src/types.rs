//! Provider-agnostic request/response types for the bridge.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Speaker of a conversation turn, as the model API sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

impl TurnRole {
    pub fn next(self) -> Self {
        match self {
            TurnRole::User => TurnRole::Model,
            TurnRole::Model => TurnRole::User,
        }
    }
}

/// One piece of a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    /// A tool invocation requested by the model.
    FunctionCall(ToolCall),
    /// The answer to a tool invocation, sent back on a user turn.
    FunctionResponse {
        id: Option<String>,
        name: String,
        response: Value,
    },
}

/// A single turn in the request sent to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: TurnRole,
    pub parts: Vec<Part>,
}

impl Turn {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            parts: vec![Part::Text(text.into())],
        }
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            parts: vec![Part::Text(text.into())],
        }
    }
}

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Provider-assigned call id, when the provider sends one.
    pub id: Option<String>,
    /// Name of the tool being called.
    pub name: String,
    /// Arguments passed to the tool (structured JSON).
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: &str, arguments: Value) -> Self {
        Self {
            id: Some(Uuid::now_v7().to_string()),
            name: name.to_string(),
            arguments,
        }
    }
}

/// Definition of a tool that can be called by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Tool description for the model.
    pub description: String,
    /// JSON schema for the tool parameters.
    pub parameters: Value,
}

/// Tunables for a chat round-trip.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Maximum model round-trips per user message.
    pub max_tool_rounds: usize,
    /// Maximum number of files quoted in the system prompt.
    pub file_context_limit: usize,
    /// Characters quoted from each file.
    pub file_context_chars: usize,
    /// Sampling temperature (provider default when `None`).
    pub temperature: Option<f32>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_tool_rounds: 5,
            file_context_limit: 5,
            file_context_chars: 1500,
            temperature: None,
        }
    }
}
