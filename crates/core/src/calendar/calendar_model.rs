//! Calendar domain models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Duration applied when an event is created without one.
pub const DEFAULT_EVENT_DURATION_MINUTES: u32 = 60;

/// A scheduled calendar event. `date` is a `YYYY-MM-DD` day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_duration() -> u32 {
    DEFAULT_EVENT_DURATION_MINUTES
}

/// A daily habit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub created_at: String,
}

/// Completion log keyed by `YYYY-MM-DD`; each value lists the habit ids
/// completed that day.
///
/// Ids of deleted habits are kept: history is never purged retroactively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct HabitLog(pub BTreeMap<String, Vec<String>>);

impl HabitLog {
    /// Habit ids completed on `date`.
    pub fn completed_on(&self, date: &str) -> &[String] {
        self.0.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_completed(&self, date: &str, habit_id: &str) -> bool {
        self.completed_on(date).iter().any(|id| id == habit_id)
    }

    /// Flips membership of `habit_id` for `date`, creating the day's entry if
    /// it is absent.
    pub fn toggle(&mut self, date: &str, habit_id: &str) {
        let day = self.0.entry(date.to_string()).or_default();
        if let Some(pos) = day.iter().position(|id| id == habit_id) {
            day.remove(pos);
        } else {
            day.push(habit_id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_habit_log_toggle_twice_restores() {
        let mut log = HabitLog::default();
        log.toggle("2024-01-01", "h1");
        assert!(log.is_completed("2024-01-01", "h1"));
        log.toggle("2024-01-01", "h1");
        assert!(!log.is_completed("2024-01-01", "h1"));
        assert!(log.completed_on("2024-01-01").is_empty());
    }

    #[test]
    fn test_habit_log_keeps_other_ids() {
        let mut log = HabitLog::default();
        log.toggle("2024-01-01", "h1");
        log.toggle("2024-01-01", "h2");
        log.toggle("2024-01-01", "h1");
        assert_eq!(log.completed_on("2024-01-01"), ["h2".to_string()]);
        assert!(log.completed_on("2024-01-02").is_empty());
    }

    #[test]
    fn test_event_defaults_duration() {
        let event: CalendarEvent =
            serde_json::from_str(r#"{"id":"e1","title":"Standup","date":"2024-01-01"}"#).unwrap();
        assert_eq!(event.duration_minutes, DEFAULT_EVENT_DURATION_MINUTES);
        assert!(event.description.is_none());
    }
}
