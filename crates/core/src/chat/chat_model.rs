use serde::{Deserialize, Serialize};

use crate::constants::{ASSISTANT_NAME, GREETING_MESSAGE_ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Model,
}

/// One chat turn. `timestamp` is epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub text: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl Message {
    pub fn user(id: String, text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id,
            role: MessageRole::User,
            text: text.into(),
            timestamp,
            is_error: false,
        }
    }

    pub fn model(id: String, text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id,
            role: MessageRole::Model,
            text: text.into(),
            timestamp,
            is_error: false,
        }
    }

    pub fn model_error(id: String, text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            is_error: true,
            ..Self::model(id, text, timestamp)
        }
    }
}

pub fn greeting_text(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        format!("Hello. I am {ASSISTANT_NAME}. I am ready to organize your life.")
    } else {
        format!("Hello {name}. I am {ASSISTANT_NAME}. I am ready to organize your life.")
    }
}

/// The canonical first message of every conversation.
pub fn greeting_message(name: &str, timestamp: i64) -> Message {
    Message::model(GREETING_MESSAGE_ID.to_string(), greeting_text(name), timestamp)
}
