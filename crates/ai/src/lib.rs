//! Assistant bridge for 2ndBrain.
//!
//! Turns a free-text chat message into store mutations and a reply:
//! - `protocol`: history sanitation into strictly alternating turns
//! - `context`: file/bank digests and the system prompt
//! - `providers`: provider adapter trait and the Gemini adapter
//! - `tools`: the tool catalog the model may call
//! - `chat`: `ChatService`, which ties it together

pub mod chat;
pub mod context;
pub mod env;
pub mod error;
pub mod protocol;
pub mod providers;
pub mod tools;
pub mod types;

pub use chat::ChatService;
pub use env::{AiEnvironment, RuntimeEnvironment};
pub use error::AiError;
pub use providers::{GeminiProvider, ProviderAdapter, ProviderRegistry};
pub use tools::{default_registry, Tool, ToolRegistry};
pub use types::ChatConfig;
