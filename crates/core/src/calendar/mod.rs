//! Calendar module - events, habits and the habit completion log.

mod calendar_model;

pub use calendar_model::{CalendarEvent, Habit, HabitLog, DEFAULT_EVENT_DURATION_MINUTES};
