//! Assistant bridge error types.

use secondbrain_core::errors::ValidationError;
use secondbrain_core::settings::AiProvider;
use thiserror::Error;

/// Assistant bridge errors.
///
/// None of these reach the chat transcript verbatim: the bridge folds
/// transport failures into a fixed apology, readiness failures into an
/// advisory, and tool failures into `Error: ...` result strings for the model.
#[derive(Debug, Error)]
pub enum AiError {
    /// Tool arguments that failed to parse or validate.
    #[error("{0}")]
    InvalidInput(String),

    #[error("Missing API key for provider {}", .0.as_str())]
    MissingApiKey(AiProvider),

    /// The configured provider has no adapter.
    #[error("Provider not supported: {}", .0.as_str())]
    UnsupportedProvider(AiProvider),

    /// Transport or API failure.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),
}

impl AiError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Stable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            AiError::InvalidInput(_) => "INVALID_INPUT",
            AiError::MissingApiKey(_) => "MISSING_API_KEY",
            AiError::UnsupportedProvider(_) => "UNSUPPORTED_PROVIDER",
            AiError::Provider(_) => "PROVIDER_ERROR",
            AiError::ToolNotFound(_) => "TOOL_NOT_FOUND",
        }
    }
}

impl From<ValidationError> for AiError {
    fn from(err: ValidationError) -> Self {
        AiError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AiError::provider("timeout").code(), "PROVIDER_ERROR");
        let missing = AiError::MissingApiKey(AiProvider::Gemini);
        assert_eq!(missing.code(), "MISSING_API_KEY");
        assert_eq!(missing.to_string(), "Missing API key for provider GEMINI");

        let err: AiError = ValidationError::InvalidDate("tomorrow".into()).into();
        assert_eq!(err.code(), "INVALID_INPUT");
        assert_eq!(err.to_string(), "Invalid date 'tomorrow', expected YYYY-MM-DD");
    }
}
