use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use secondbrain_core::calendar::{CalendarEvent, Habit, DEFAULT_EVENT_DURATION_MINUTES};
use secondbrain_core::utils::new_id;
use secondbrain_core::{find_by_name, Action};

use super::constants::{ADD_EVENT, ADD_HABIT, DELETE_EVENT, UPDATE_EVENT};
use super::{
    non_blank, not_found, parse_args, require_clock_time, require_day, require_text, Tool,
    ToolContext,
};
use crate::error::AiError;

fn duration_or_default(minutes: Option<f64>) -> u32 {
    match minutes {
        Some(m) if m.is_finite() && m >= 1.0 => m.round().min(u32::MAX as f64) as u32,
        _ => DEFAULT_EVENT_DURATION_MINUTES,
    }
}

// ----------------------------------------------------------------------------
// AddEventTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddEventArgs {
    title: String,
    date: String,
    start_time: String,
    #[serde(default)]
    duration_minutes: Option<f64>,
    #[serde(default)]
    description: Option<String>,
}

pub struct AddEventTool;

#[async_trait]
impl Tool for AddEventTool {
    fn name(&self) -> &str {
        ADD_EVENT
    }

    fn description(&self) -> &str {
        "Schedule a calendar event."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "date": { "type": "string", "description": "YYYY-MM-DD" },
                "startTime": { "type": "string", "description": "HH:mm" },
                "durationMinutes": { "type": "number" },
                "description": { "type": "string" }
            },
            "required": ["title", "date", "startTime"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: AddEventArgs = parse_args(args)?;
        let event = CalendarEvent {
            id: new_id(),
            title: require_text("title", &args.title)?,
            date: require_day(&args.date)?,
            start_time: require_clock_time(&args.start_time)?,
            duration_minutes: duration_or_default(args.duration_minutes),
            description: non_blank(args.description),
        };
        ctx.store.dispatch(Action::AddEvent(event));
        Ok("Event scheduled.".to_string())
    }
}

// ----------------------------------------------------------------------------
// UpdateEventTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateEventArgs {
    current_title: String,
    #[serde(default)]
    new_date: Option<String>,
    #[serde(default)]
    new_time: Option<String>,
    #[serde(default)]
    new_title: Option<String>,
}

pub struct UpdateEventTool;

#[async_trait]
impl Tool for UpdateEventTool {
    fn name(&self) -> &str {
        UPDATE_EVENT
    }

    fn description(&self) -> &str {
        "Reschedule or rename an event."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "currentTitle": { "type": "string" },
                "newDate": { "type": "string", "description": "YYYY-MM-DD" },
                "newTime": { "type": "string", "description": "HH:mm" },
                "newTitle": { "type": "string" }
            },
            "required": ["currentTitle"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: UpdateEventArgs = parse_args(args)?;
        // Validate before lookup so a bad date is reported even for a known event.
        let new_date = non_blank(args.new_date).map(|d| require_day(&d)).transpose()?;
        let new_time = non_blank(args.new_time)
            .map(|t| require_clock_time(&t))
            .transpose()?;

        let state = ctx.store.snapshot();
        let Some(event) = find_by_name(&state.events, &args.current_title) else {
            return Ok(not_found("Event", &args.current_title));
        };

        let mut updated = event.clone();
        if let Some(title) = non_blank(args.new_title) {
            updated.title = title;
        }
        if let Some(date) = new_date {
            updated.date = date;
        }
        if let Some(time) = new_time {
            updated.start_time = time;
        }

        ctx.store.dispatch(Action::UpdateEvent(updated));
        Ok("Event updated.".to_string())
    }
}

// ----------------------------------------------------------------------------
// DeleteEventTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct DeleteEventArgs {
    title: String,
}

pub struct DeleteEventTool;

#[async_trait]
impl Tool for DeleteEventTool {
    fn name(&self) -> &str {
        DELETE_EVENT
    }

    fn description(&self) -> &str {
        "Cancel/Delete an event by title."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "title": { "type": "string" } },
            "required": ["title"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: DeleteEventArgs = parse_args(args)?;
        let state = ctx.store.snapshot();
        let Some(event) = find_by_name(&state.events, &args.title) else {
            return Ok(not_found("Event", &args.title));
        };
        ctx.store.dispatch(Action::DeleteEvent(event.id.clone()));
        Ok("Event removed.".to_string())
    }
}

// ----------------------------------------------------------------------------
// AddHabitTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct AddHabitArgs {
    title: String,
}

pub struct AddHabitTool;

#[async_trait]
impl Tool for AddHabitTool {
    fn name(&self) -> &str {
        ADD_HABIT
    }

    fn description(&self) -> &str {
        "Add a new daily habit."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "title": { "type": "string" } },
            "required": ["title"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: AddHabitArgs = parse_args(args)?;
        let habit = Habit {
            id: new_id(),
            title: require_text("title", &args.title)?,
            created_at: ctx.timestamp(),
        };
        ctx.store.dispatch(Action::AddHabit(habit));
        Ok("Habit added.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::context;
    use super::*;

    #[tokio::test]
    async fn test_add_event_defaults_duration() {
        let ctx = context();
        let result = AddEventTool
            .execute(
                json!({"title": "Dentist", "date": "2024-05-03", "startTime": "14:00"}),
                &ctx,
            )
            .await
            .unwrap();
        assert_eq!(result, "Event scheduled.");

        let state = ctx.store.snapshot();
        assert_eq!(state.events[0].duration_minutes, 60);
        assert_eq!(state.events[0].description, None);
    }

    #[tokio::test]
    async fn test_add_event_rejects_bad_date() {
        let ctx = context();
        let err = AddEventTool
            .execute(
                json!({"title": "Dentist", "date": "next friday", "startTime": "14:00"}),
                &ctx,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
        assert!(ctx.store.snapshot().events.is_empty());
    }

    #[tokio::test]
    async fn test_update_event_reschedules_and_resorts() {
        let ctx = context();
        for (title, date) in [("Dentist", "2024-05-03"), ("Gym", "2024-05-05")] {
            AddEventTool
                .execute(json!({"title": title, "date": date, "startTime": "09:00"}), &ctx)
                .await
                .unwrap();
        }

        let result = UpdateEventTool
            .execute(
                json!({"currentTitle": "dentist", "newDate": "2024-05-10", "newTime": "16:30"}),
                &ctx,
            )
            .await
            .unwrap();
        assert_eq!(result, "Event updated.");

        let state = ctx.store.snapshot();
        assert_eq!(state.events[0].title, "Gym");
        assert_eq!(state.events[1].date, "2024-05-10");
        assert_eq!(state.events[1].start_time, "16:30");
    }

    #[tokio::test]
    async fn test_delete_event_and_missing() {
        let ctx = context();
        AddEventTool
            .execute(json!({"title": "Standup", "date": "2024-05-03", "startTime": "09:00"}), &ctx)
            .await
            .unwrap();

        let missing = DeleteEventTool
            .execute(json!({"title": "Retro"}), &ctx)
            .await
            .unwrap();
        assert_eq!(missing, "Error: Event \"Retro\" not found.");

        let result = DeleteEventTool
            .execute(json!({"title": "stand"}), &ctx)
            .await
            .unwrap();
        assert_eq!(result, "Event removed.");
        assert!(ctx.store.snapshot().events.is_empty());
    }

    #[tokio::test]
    async fn test_add_habit() {
        let ctx = context();
        let result = AddHabitTool
            .execute(json!({"title": "Read 20 pages"}), &ctx)
            .await
            .unwrap();
        assert_eq!(result, "Habit added.");
        assert_eq!(ctx.store.snapshot().habits[0].title, "Read 20 pages");
    }
}
