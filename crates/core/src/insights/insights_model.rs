//! Insight models.

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarEvent;
use crate::notes::Note;

/// Balance-sheet style view of the wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    /// Sum of non-credit, non-excluded account balances
    pub total_assets: f64,
    /// Sum of credit account balances (positive magnitude), excluded accounts skipped
    pub total_liabilities: f64,
    /// Assets minus liabilities
    pub net_worth: f64,
    pub total_income: f64,
    pub total_expenses: f64,
    /// Income minus expenses
    pub net_cash_flow: f64,
    /// Currency symbol from settings
    pub currency: String,
}

/// Habit completion score for one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityPoint {
    /// `YYYY-MM-DD`
    pub date: String,
    /// 0 to 100
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: String,
    pub title: String,
    /// Funded share of the target, capped at 100
    pub percent: f64,
    /// Amount still missing, never negative
    pub remaining: f64,
    /// Whole days until the deadline; 0 once expired or when unparseable
    pub days_left: i64,
    pub is_expired: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    pub project_id: String,
    pub title: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Completed share of tasks, 0 when the project has none
    pub percent: f64,
    /// Sum of task amounts
    pub task_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CrmSummary {
    /// Projects not started or in progress
    pub active_projects: usize,
    /// Sum of all project budgets
    pub total_budget: f64,
    /// Tasks not yet completed
    pub pending_tasks: usize,
    pub contacts: usize,
    pub projects: Vec<ProjectProgress>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub note_count: usize,
    pub event_count: usize,
    pub task_count: usize,
    pub pending_tasks: usize,
    /// Signed sum of all transactions
    pub balance: f64,
    /// Most recently added notes, at most three
    pub recent_notes: Vec<Note>,
    /// Next events from today on, at most three
    pub upcoming_events: Vec<CalendarEvent>,
}
