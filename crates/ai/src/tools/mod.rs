//! Tool registry and execution for the assistant.
//!
//! Every tool is a thin adapter: it validates arguments, resolves any target
//! record by name against a fresh snapshot, builds a complete record and
//! issues exactly one dispatch. Nothing here touches storage directly.

pub mod constants;

mod calendar;
mod crm;
mod files;
mod finance;
mod notes;

pub use calendar::{AddEventTool, AddHabitTool, DeleteEventTool, UpdateEventTool};
pub use crm::{AddContactTool, AddProjectTool, AddTaskToProjectTool, DeleteTaskTool, UpdateTaskTool};
pub use files::{DeleteFileTool, UpdateFileTool};
pub use finance::{AddBankAccountTool, AddTransactionTool};
pub use notes::{AddNoteTool, DeleteNoteTool, UpdateNoteTool};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use secondbrain_core::errors::ValidationError;
use secondbrain_core::utils::time_utils::{is_valid_clock_time, is_valid_day, iso_timestamp};
use secondbrain_core::Store;

use crate::error::AiError;
use crate::types::ToolDefinition;

// ============================================================================
// Tool Trait
// ============================================================================

/// Context available to tools during execution.
pub struct ToolContext {
    pub store: Arc<Store>,
    /// Time used for generated timestamps.
    pub now: DateTime<Utc>,
}

impl ToolContext {
    pub fn new(store: Arc<Store>, now: DateTime<Utc>) -> Self {
        Self { store, now }
    }

    /// `now` as a millisecond ISO timestamp.
    pub fn timestamp(&self) -> String {
        iso_timestamp(self.now)
    }
}

/// A callable operation exposed to the model.
///
/// `execute` returns the text fed back to the model. A target that cannot be
/// found is a normal `Ok` result ("Error: ... not found."); `Err` is reserved
/// for arguments that fail validation.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema for the tool parameters.
    fn parameters_schema(&self) -> Value;

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError>;

    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Definitions of every registered tool, ordered by name.
    pub fn get_definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> =
            self.tools.values().map(|t| t.to_definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    pub async fn execute(
        &self,
        name: &str,
        args: Value,
        ctx: &ToolContext,
    ) -> Result<String, AiError> {
        let tool = self
            .get(name)
            .ok_or_else(|| AiError::ToolNotFound(name.to_string()))?;
        tool.execute(args, ctx).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry with the full assistant catalog.
pub fn default_registry() -> ToolRegistry {
    let tools: Vec<Arc<dyn Tool>> = vec![
        Arc::new(AddNoteTool),
        Arc::new(UpdateNoteTool),
        Arc::new(DeleteNoteTool),
        Arc::new(AddEventTool),
        Arc::new(UpdateEventTool),
        Arc::new(DeleteEventTool),
        Arc::new(AddHabitTool),
        Arc::new(AddTransactionTool),
        Arc::new(AddBankAccountTool),
        Arc::new(AddContactTool),
        Arc::new(AddProjectTool),
        Arc::new(AddTaskToProjectTool),
        Arc::new(UpdateTaskTool),
        Arc::new(DeleteTaskTool),
        Arc::new(UpdateFileTool),
        Arc::new(DeleteFileTool),
    ];

    let mut registry = ToolRegistry::new();
    for tool in tools {
        registry.register(tool);
    }
    registry
}

// ============================================================================
// Argument helpers
// ============================================================================

/// Parse tool arguments from JSON value with validation.
pub fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, AiError> {
    serde_json::from_value(args)
        .map_err(|e| AiError::invalid_input(format!("Invalid tool arguments: {}", e)))
}

/// Trimmed, non-blank text.
pub(crate) fn require_text(field: &str, value: &str) -> Result<String, AiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()).into());
    }
    Ok(trimmed.to_string())
}

/// `Some` only when the value has non-blank text.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn require_day(value: &str) -> Result<String, AiError> {
    let value = value.trim();
    if !is_valid_day(value) {
        return Err(ValidationError::InvalidDate(value.to_string()).into());
    }
    Ok(value.to_string())
}

pub(crate) fn require_clock_time(value: &str) -> Result<String, AiError> {
    let value = value.trim();
    if !is_valid_clock_time(value) {
        return Err(ValidationError::InvalidTime(value.to_string()).into());
    }
    Ok(value.to_string())
}

pub(crate) fn require_finite(field: &str, value: f64) -> Result<f64, AiError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidAmount(field.to_string()).into());
    }
    Ok(value)
}

/// Tool result for a name lookup that matched nothing.
pub(crate) fn not_found(kind: &str, name: &str) -> String {
    format!("Error: {} \"{}\" not found.", kind, name)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;
    use secondbrain_core::state::MemoryStorage;

    pub fn context() -> ToolContext {
        let store = Arc::new(Store::new(Arc::new(MemoryStorage::new())));
        store.initialize();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        ToolContext::new(store, now)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::context;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_registry_catalog() {
        let registry = default_registry();
        let names = registry.list_names();
        assert_eq!(names.len(), 16);
        for name in [
            constants::ADD_NOTE,
            constants::ADD_TASK_TO_PROJECT,
            constants::UPDATE_FILE,
            constants::DELETE_FILE,
        ] {
            assert!(names.iter().any(|n| n == name), "missing {}", name);
        }
        let definitions = registry.get_definitions();
        assert!(definitions.windows(2).all(|w| w[0].name < w[1].name));
        assert!(definitions.iter().all(|d| d.parameters["type"] == "object"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_not_found() {
        let ctx = context();
        let err = default_registry()
            .execute("launchRocket", json!({}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::ToolNotFound(_)));
    }

    #[test]
    fn test_validation_helpers() {
        assert_eq!(require_text("title", "  Hi ").unwrap(), "Hi");
        assert!(require_text("title", "   ").is_err());
        assert!(require_day("2024-02-30").is_err());
        assert_eq!(require_day(" 2024-02-29 ").unwrap(), "2024-02-29");
        assert!(require_clock_time("25:00").is_err());
        assert!(require_finite("amount", f64::NAN).is_err());
        assert_eq!(non_blank(Some(" ".into())), None);
    }

    #[test]
    fn test_parse_args_reports_invalid_input() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Args {
            title: String,
        }
        let err = parse_args::<Args>(json!({"title": 5})).unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }
}
