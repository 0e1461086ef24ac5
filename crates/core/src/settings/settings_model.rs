//! Settings and profile models.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CURRENCY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AiProvider {
    #[default]
    Gemini,
    Openai,
    Claude,
}

impl AiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiProvider::Gemini => "GEMINI",
            AiProvider::Openai => "OPENAI",
            AiProvider::Claude => "CLAUDE",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ApiKeys {
    #[serde(rename = "GEMINI")]
    pub gemini: String,
    #[serde(rename = "OPENAI")]
    pub openai: String,
    #[serde(rename = "CLAUDE")]
    pub claude: String,
}

impl ApiKeys {
    pub fn for_provider(&self, provider: AiProvider) -> &str {
        match provider {
            AiProvider::Gemini => &self.gemini,
            AiProvider::Openai => &self.openai,
            AiProvider::Claude => &self.claude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AiSettings {
    pub provider: AiProvider,
    /// Display symbol, e.g. `$` or `€`.
    pub currency: String,
    pub api_keys: ApiKeys,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            provider: AiProvider::Gemini,
            currency: DEFAULT_CURRENCY.to_string(),
            api_keys: ApiKeys::default(),
        }
    }
}

impl AiSettings {
    /// Applies the fields present in `update`, leaving the rest untouched.
    pub fn merged(&self, update: SettingsUpdate) -> Self {
        Self {
            provider: update.provider.unwrap_or(self.provider),
            currency: update.currency.unwrap_or_else(|| self.currency.clone()),
            api_keys: update.api_keys.unwrap_or_else(|| self.api_keys.clone()),
        }
    }
}

/// Partial settings update; omitted fields keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<AiProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_keys: Option<ApiKeys>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub is_logged_in: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_merge() {
        let current = AiSettings::default();
        let merged = current.merged(SettingsUpdate {
            currency: Some("€".to_string()),
            ..Default::default()
        });
        assert_eq!(merged.currency, "€");
        assert_eq!(merged.provider, AiProvider::Gemini);
    }

    #[test]
    fn test_settings_load_with_missing_fields() {
        let settings: AiSettings =
            serde_json::from_str(r#"{"provider":"CLAUDE","apiKeys":{"GEMINI":"k"}}"#).unwrap();
        assert_eq!(settings.provider, AiProvider::Claude);
        assert_eq!(settings.currency, "$");
        assert_eq!(settings.api_keys.for_provider(AiProvider::Gemini), "k");
        assert_eq!(settings.api_keys.claude, "");
    }
}
