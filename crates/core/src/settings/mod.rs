//! Settings module - user profile and assistant settings.

mod settings_model;

pub use settings_model::{AiProvider, AiSettings, ApiKeys, SettingsUpdate, UserProfile};
