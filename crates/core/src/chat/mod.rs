//! Chat module - assistant conversation history.

mod chat_model;

pub use chat_model::{greeting_message, greeting_text, Message, MessageRole};
