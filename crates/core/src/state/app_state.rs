use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarEvent, Habit, HabitLog};
use crate::chat::Message;
use crate::crm::{Contact, Project, Task};
use crate::files::FileItem;
use crate::finance::{BankAccount, Transaction};
use crate::goals::Goal;
use crate::notes::Note;
use crate::settings::{AiSettings, UserProfile};
use crate::utils::serde_utils::null_as_default;

/// The aggregate document: every collection the app owns, persisted as one
/// JSON object.
///
/// Each field defaults independently, so a document saved by an older build
/// (missing keys, or `null` where a list is now expected) still loads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    #[serde(deserialize_with = "null_as_default")]
    pub user_profile: UserProfile,
    #[serde(deserialize_with = "null_as_default")]
    pub notes: Vec<Note>,
    #[serde(deserialize_with = "null_as_default")]
    pub events: Vec<CalendarEvent>,
    #[serde(deserialize_with = "null_as_default")]
    pub transactions: Vec<Transaction>,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_accounts: Vec<BankAccount>,
    #[serde(deserialize_with = "null_as_default")]
    pub contacts: Vec<Contact>,
    #[serde(deserialize_with = "null_as_default")]
    pub habits: Vec<Habit>,
    #[serde(deserialize_with = "null_as_default")]
    pub habit_log: HabitLog,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "null_as_default")]
    pub tasks: Vec<Task>,
    #[serde(deserialize_with = "null_as_default")]
    pub goals: Vec<Goal>,
    #[serde(deserialize_with = "null_as_default")]
    pub files: Vec<FileItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub chat_history: Vec<Message>,
    #[serde(deserialize_with = "null_as_default")]
    pub settings: AiSettings,
}

impl AppState {
    pub fn from_json(raw: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn tasks_for_project<'a>(&'a self, project_id: &'a str) -> impl Iterator<Item = &'a Task> {
        self.tasks.iter().filter(move |t| t.project_id == project_id)
    }
}
