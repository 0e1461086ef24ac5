use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use secondbrain_core::notes::Note;
use secondbrain_core::utils::new_id;
use secondbrain_core::{find_by_name, Action};

use super::constants::{ADD_NOTE, DELETE_NOTE, UPDATE_NOTE};
use super::{non_blank, not_found, parse_args, Tool, ToolContext};
use crate::error::AiError;

const UNTITLED: &str = "Untitled";

// ----------------------------------------------------------------------------
// AddNoteTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct AddNoteArgs {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

pub struct AddNoteTool;

#[async_trait]
impl Tool for AddNoteTool {
    fn name(&self) -> &str {
        ADD_NOTE
    }

    fn description(&self) -> &str {
        "Create a new note."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string", "description": "Note title" },
                "content": { "type": "string", "description": "Note content" },
                "tags": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["title", "content"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: AddNoteArgs = parse_args(args)?;
        let note = Note {
            id: new_id(),
            title: non_blank(args.title).unwrap_or_else(|| UNTITLED.to_string()),
            content: args.content.unwrap_or_default(),
            created_at: ctx.timestamp(),
            tags: args.tags.unwrap_or_default(),
            is_bookmarked: false,
        };
        ctx.store.dispatch(Action::AddNote(note));
        Ok("Note created.".to_string())
    }
}

// ----------------------------------------------------------------------------
// UpdateNoteTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateNoteArgs {
    current_title: String,
    #[serde(default)]
    new_title: Option<String>,
    #[serde(default)]
    append_content: Option<String>,
    #[serde(default)]
    replace_content: Option<String>,
}

pub struct UpdateNoteTool;

#[async_trait]
impl Tool for UpdateNoteTool {
    fn name(&self) -> &str {
        UPDATE_NOTE
    }

    fn description(&self) -> &str {
        "Update an existing note. Finds note by title."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "currentTitle": { "type": "string", "description": "The title of the note to search for." },
                "newTitle": { "type": "string", "description": "Optional new title." },
                "appendContent": { "type": "string", "description": "Text to append to the existing content." },
                "replaceContent": { "type": "string", "description": "Text to replace the entire content." }
            },
            "required": ["currentTitle"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: UpdateNoteArgs = parse_args(args)?;
        let state = ctx.store.snapshot();
        let Some(note) = find_by_name(&state.notes, &args.current_title) else {
            return Ok(not_found("Note", &args.current_title));
        };

        let mut updated = note.clone();
        if let Some(replacement) = non_blank(args.replace_content) {
            updated.content = replacement;
        } else if let Some(extra) = non_blank(args.append_content) {
            updated.content.push('\n');
            updated.content.push_str(&extra);
        }
        if let Some(title) = non_blank(args.new_title) {
            updated.title = title;
        }

        ctx.store.dispatch(Action::UpdateNote(updated));
        Ok("Note updated.".to_string())
    }
}

// ----------------------------------------------------------------------------
// DeleteNoteTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct DeleteNoteArgs {
    title: String,
}

pub struct DeleteNoteTool;

#[async_trait]
impl Tool for DeleteNoteTool {
    fn name(&self) -> &str {
        DELETE_NOTE
    }

    fn description(&self) -> &str {
        "Delete a note by title."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "title": { "type": "string" } },
            "required": ["title"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: DeleteNoteArgs = parse_args(args)?;
        let state = ctx.store.snapshot();
        let Some(note) = find_by_name(&state.notes, &args.title) else {
            return Ok(not_found("Note", &args.title));
        };
        ctx.store.dispatch(Action::DeleteNote(note.id.clone()));
        Ok("Note deleted.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::context;
    use super::*;

    #[tokio::test]
    async fn test_add_note_defaults_title() {
        let ctx = context();
        let result = AddNoteTool
            .execute(json!({"title": "  ", "content": "body"}), &ctx)
            .await
            .unwrap();
        assert_eq!(result, "Note created.");

        let state = ctx.store.snapshot();
        assert_eq!(state.notes[0].title, "Untitled");
        assert_eq!(state.notes[0].created_at, "2024-05-01T09:30:00.000Z");
        assert!(state.notes[0].tags.is_empty());
    }

    #[tokio::test]
    async fn test_update_note_append_and_replace() {
        let ctx = context();
        AddNoteTool
            .execute(json!({"title": "Groceries", "content": "milk"}), &ctx)
            .await
            .unwrap();

        let result = UpdateNoteTool
            .execute(json!({"currentTitle": "groceries", "appendContent": "eggs"}), &ctx)
            .await
            .unwrap();
        assert_eq!(result, "Note updated.");
        assert_eq!(ctx.store.snapshot().notes[0].content, "milk\neggs");

        UpdateNoteTool
            .execute(
                json!({"currentTitle": "Groceries", "replaceContent": "bread", "appendContent": "x", "newTitle": "Shopping"}),
                &ctx,
            )
            .await
            .unwrap();
        let state = ctx.store.snapshot();
        assert_eq!(state.notes[0].content, "bread");
        assert_eq!(state.notes[0].title, "Shopping");
    }

    #[tokio::test]
    async fn test_delete_note_not_found_is_result() {
        let ctx = context();
        let result = DeleteNoteTool
            .execute(json!({"title": "Ghost"}), &ctx)
            .await
            .unwrap();
        assert_eq!(result, "Error: Note \"Ghost\" not found.");
    }

    #[tokio::test]
    async fn test_delete_note_prefers_exact_match() {
        let ctx = context();
        for title in ["Grocery List", "Groceries"] {
            AddNoteTool
                .execute(json!({"title": title, "content": ""}), &ctx)
                .await
                .unwrap();
        }
        DeleteNoteTool
            .execute(json!({"title": "groceries"}), &ctx)
            .await
            .unwrap();
        let state = ctx.store.snapshot();
        assert_eq!(state.notes.len(), 1);
        assert_eq!(state.notes[0].title, "Grocery List");
    }
}
