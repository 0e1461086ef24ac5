use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use secondbrain_core::{find_by_name, Action};

use super::constants::{DELETE_FILE, UPDATE_FILE};
use super::{not_found, parse_args, Tool, ToolContext};
use crate::error::AiError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum WriteMode {
    #[default]
    Append,
    Overwrite,
}

// ----------------------------------------------------------------------------
// UpdateFileTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateFileArgs {
    file_name: String,
    content: String,
    #[serde(default)]
    operation: Option<WriteMode>,
}

pub struct UpdateFileTool;

#[async_trait]
impl Tool for UpdateFileTool {
    fn name(&self) -> &str {
        UPDATE_FILE
    }

    fn description(&self) -> &str {
        "Modify a file's content."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "fileName": { "type": "string" },
                "content": { "type": "string" },
                "operation": { "type": "string", "enum": ["APPEND", "OVERWRITE"], "description": "Defaults to APPEND" }
            },
            "required": ["fileName", "content"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: UpdateFileArgs = parse_args(args)?;
        let state = ctx.store.snapshot();
        // Folders have no content; a name that resolves to one is treated as missing.
        let file = match find_by_name(&state.files, &args.file_name) {
            Some(file) if !file.is_folder() => file,
            _ => return Ok(not_found("File", &args.file_name)),
        };

        let mut updated = file.clone();
        let content = match args.operation.unwrap_or_default() {
            WriteMode::Overwrite => args.content,
            WriteMode::Append => match updated.content.as_deref() {
                Some(existing) if !existing.is_empty() => format!("{}\n{}", existing, args.content),
                _ => args.content,
            },
        };
        updated.content = Some(content);
        updated.updated_at = ctx.timestamp();

        ctx.store.dispatch(Action::UpdateFile(updated));
        Ok("File updated.".to_string())
    }
}

// ----------------------------------------------------------------------------
// DeleteFileTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct DeleteFileArgs {
    name: String,
}

pub struct DeleteFileTool;

#[async_trait]
impl Tool for DeleteFileTool {
    fn name(&self) -> &str {
        DELETE_FILE
    }

    fn description(&self) -> &str {
        "Delete a file or folder."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "name": { "type": "string" } },
            "required": ["name"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: DeleteFileArgs = parse_args(args)?;
        let state = ctx.store.snapshot();
        let Some(item) = find_by_name(&state.files, &args.name) else {
            return Ok(not_found("File or Folder", &args.name));
        };
        ctx.store.dispatch(Action::DeleteFile(item.id.clone()));
        Ok("File/Folder deleted.".to_string())
    }
}
