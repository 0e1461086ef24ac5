//! Goals module - savings goals and their contribution entries.

mod goals_model;

pub use goals_model::{Goal, GoalEntry};
