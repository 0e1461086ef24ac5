use serde::{Deserialize, Serialize};

use super::app_state::AppState;
use crate::calendar::{CalendarEvent, Habit};
use crate::chat::Message;
use crate::crm::{Contact, NewTask, Project, Task};
use crate::files::FileItem;
use crate::finance::{BankAccount, Transaction};
use crate::goals::{Goal, GoalEntry};
use crate::notes::Note;
use crate::settings::SettingsUpdate;

/// Every mutation the store accepts.
///
/// Serializes as `{ "type": "ADD_NOTE", "payload": { ... } }`. Delete and
/// toggle actions carry the target id as their payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Login {
        name: String,
        #[serde(default)]
        email: Option<String>,
    },
    Logout,

    AddNote(Note),
    UpdateNote(Note),
    DeleteNote(String),
    ToggleNoteBookmark(String),

    AddEvent(CalendarEvent),
    UpdateEvent(CalendarEvent),
    DeleteEvent(String),

    AddTransaction(Transaction),
    AddBankAccount(BankAccount),
    UpdateBankAccount(BankAccount),
    ToggleBankAccountExclusion(String),
    DeleteBankAccount(String),

    AddContact(Contact),
    UpdateContact(Contact),
    DeleteContact(String),

    AddHabit(Habit),
    DeleteHabit(String),
    #[serde(rename_all = "camelCase")]
    ToggleHabitCompletion {
        date: String,
        habit_id: String,
    },

    AddProject(Project),
    UpdateProject(Project),
    /// Also deletes every task of the project.
    DeleteProject(String),

    AddTask(NewTask),
    UpdateTask(Task),
    DeleteTask(String),

    AddGoal(Goal),
    UpdateGoal(Goal),
    DeleteGoal(String),
    #[serde(rename_all = "camelCase")]
    AddGoalEntry {
        goal_id: String,
        entry: GoalEntry,
    },

    AddFile(FileItem),
    UpdateFile(FileItem),
    /// Also deletes everything below the item.
    DeleteFile(String),

    AddMessage(Message),
    ClearChat,

    UpdateSettings(SettingsUpdate),
    LoadData(Box<AppState>),
}

impl Action {
    /// Wire name of the action, for logging.
    pub fn action_type(&self) -> &'static str {
        match self {
            Action::Login { .. } => "LOGIN",
            Action::Logout => "LOGOUT",
            Action::AddNote(_) => "ADD_NOTE",
            Action::UpdateNote(_) => "UPDATE_NOTE",
            Action::DeleteNote(_) => "DELETE_NOTE",
            Action::ToggleNoteBookmark(_) => "TOGGLE_NOTE_BOOKMARK",
            Action::AddEvent(_) => "ADD_EVENT",
            Action::UpdateEvent(_) => "UPDATE_EVENT",
            Action::DeleteEvent(_) => "DELETE_EVENT",
            Action::AddTransaction(_) => "ADD_TRANSACTION",
            Action::AddBankAccount(_) => "ADD_BANK_ACCOUNT",
            Action::UpdateBankAccount(_) => "UPDATE_BANK_ACCOUNT",
            Action::ToggleBankAccountExclusion(_) => "TOGGLE_BANK_ACCOUNT_EXCLUSION",
            Action::DeleteBankAccount(_) => "DELETE_BANK_ACCOUNT",
            Action::AddContact(_) => "ADD_CONTACT",
            Action::UpdateContact(_) => "UPDATE_CONTACT",
            Action::DeleteContact(_) => "DELETE_CONTACT",
            Action::AddHabit(_) => "ADD_HABIT",
            Action::DeleteHabit(_) => "DELETE_HABIT",
            Action::ToggleHabitCompletion { .. } => "TOGGLE_HABIT_COMPLETION",
            Action::AddProject(_) => "ADD_PROJECT",
            Action::UpdateProject(_) => "UPDATE_PROJECT",
            Action::DeleteProject(_) => "DELETE_PROJECT",
            Action::AddTask(_) => "ADD_TASK",
            Action::UpdateTask(_) => "UPDATE_TASK",
            Action::DeleteTask(_) => "DELETE_TASK",
            Action::AddGoal(_) => "ADD_GOAL",
            Action::UpdateGoal(_) => "UPDATE_GOAL",
            Action::DeleteGoal(_) => "DELETE_GOAL",
            Action::AddGoalEntry { .. } => "ADD_GOAL_ENTRY",
            Action::AddFile(_) => "ADD_FILE",
            Action::UpdateFile(_) => "UPDATE_FILE",
            Action::DeleteFile(_) => "DELETE_FILE",
            Action::AddMessage(_) => "ADD_MESSAGE",
            Action::ClearChat => "CLEAR_CHAT",
            Action::UpdateSettings(_) => "UPDATE_SETTINGS",
            Action::LoadData(_) => "LOAD_DATA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_wire_shape() {
        let action = Action::ToggleHabitCompletion {
            date: "2024-01-01".to_string(),
            habit_id: "h1".to_string(),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({"type": "TOGGLE_HABIT_COMPLETION", "payload": {"date": "2024-01-01", "habitId": "h1"}})
        );
        assert_eq!(
            serde_json::to_value(Action::DeleteNote("n1".into())).unwrap(),
            json!({"type": "DELETE_NOTE", "payload": "n1"})
        );
    }

    #[test]
    fn test_action_parses_from_ui_vocabulary() {
        let action: Action = serde_json::from_value(json!({
            "type": "ADD_GOAL_ENTRY",
            "payload": {"goalId": "g1", "entry": {"id": "e1", "amount": 20, "date": "2024-02-01"}}
        }))
        .unwrap();
        assert_eq!(action.action_type(), "ADD_GOAL_ENTRY");

        let logout: Action = serde_json::from_value(json!({"type": "LOGOUT"})).unwrap();
        assert_eq!(logout, Action::Logout);
    }
}
