//! Environment abstraction for credentials, model selection and time.
//!
//! The front end supplies a runtime implementation; the bridge never reads
//! process state directly, so tests can run with an in-memory environment.

use chrono::{DateTime, Utc};
use secondbrain_core::settings::AiProvider;

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Environment abstraction for runtime dependencies.
pub trait AiEnvironment: Send + Sync {
    /// API key configured out of band for `provider`, if any.
    ///
    /// A key stored in the user's settings takes precedence over this one.
    fn get_api_key(&self, provider: AiProvider) -> Option<String>;

    /// Model id to use for `provider`.
    fn get_model(&self, provider: AiProvider) -> Option<String>;

    /// Get the current time.
    /// Abstracted for testing purposes.
    fn now(&self) -> DateTime<Utc>;
}

/// Runtime environment built from the application configuration.
#[derive(Debug, Clone)]
pub struct RuntimeEnvironment {
    gemini_api_key: Option<String>,
    gemini_model: String,
}

impl RuntimeEnvironment {
    pub fn new(gemini_api_key: Option<String>, gemini_model: Option<String>) -> Self {
        Self {
            gemini_api_key: gemini_api_key.filter(|k| !k.trim().is_empty()),
            gemini_model: gemini_model
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        }
    }

    /// Reads `GEMINI_API_KEY` (or the legacy `API_KEY`) and `SB_GEMINI_MODEL`.
    pub fn from_env() -> Self {
        let key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("API_KEY").ok());
        Self::new(key, std::env::var("SB_GEMINI_MODEL").ok())
    }
}

impl AiEnvironment for RuntimeEnvironment {
    fn get_api_key(&self, provider: AiProvider) -> Option<String> {
        match provider {
            AiProvider::Gemini => self.gemini_api_key.clone(),
            AiProvider::Openai | AiProvider::Claude => None,
        }
    }

    fn get_model(&self, provider: AiProvider) -> Option<String> {
        match provider {
            AiProvider::Gemini => Some(self.gemini_model.clone()),
            AiProvider::Openai | AiProvider::Claude => None,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test environment for unit testing without network access.
#[cfg(test)]
pub mod test_env {
    use super::*;
    use std::collections::HashMap;

    /// Mock environment for testing.
    pub struct MockEnvironment {
        pub api_keys: HashMap<AiProvider, String>,
        pub models: HashMap<AiProvider, String>,
        pub fixed_time: Option<DateTime<Utc>>,
    }

    impl MockEnvironment {
        pub fn new() -> Self {
            Self {
                api_keys: HashMap::new(),
                models: HashMap::new(),
                fixed_time: None,
            }
        }

        pub fn with_api_key(mut self, provider: AiProvider, key: &str) -> Self {
            self.api_keys.insert(provider, key.to_string());
            self
        }

        pub fn with_time(mut self, now: DateTime<Utc>) -> Self {
            self.fixed_time = Some(now);
            self
        }
    }

    impl Default for MockEnvironment {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AiEnvironment for MockEnvironment {
        fn get_api_key(&self, provider: AiProvider) -> Option<String> {
            self.api_keys.get(&provider).cloned()
        }

        fn get_model(&self, provider: AiProvider) -> Option<String> {
            self.models
                .get(&provider)
                .cloned()
                .or_else(|| Some(DEFAULT_GEMINI_MODEL.to_string()))
        }

        fn now(&self) -> DateTime<Utc> {
            self.fixed_time.unwrap_or_else(Utc::now)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_env::MockEnvironment;
    use super::*;

    #[test]
    fn test_runtime_environment_defaults_model() {
        let env = RuntimeEnvironment::new(Some("  ".into()), None);
        assert!(env.get_api_key(AiProvider::Gemini).is_none());
        assert_eq!(
            env.get_model(AiProvider::Gemini).as_deref(),
            Some(DEFAULT_GEMINI_MODEL)
        );
        assert!(env.get_model(AiProvider::Claude).is_none());
    }

    #[test]
    fn test_mock_environment() {
        let env = MockEnvironment::new().with_api_key(AiProvider::Gemini, "g-test");
        assert_eq!(env.get_api_key(AiProvider::Gemini).as_deref(), Some("g-test"));
        assert!(env.get_api_key(AiProvider::Openai).is_none());
    }
}
