use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::insights_model::{
    CrmSummary, DashboardSummary, GoalProgress, ProductivityPoint, ProjectProgress, WalletSummary,
};
use crate::finance::TransactionType;
use crate::goals::Goal;
use crate::state::AppState;
use crate::utils::time_utils::{day_string, get_days_between, parse_instant};

const DASHBOARD_PREVIEW_LEN: usize = 3;

fn percent(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        0.0
    } else {
        (part / whole * 100.0).clamp(0.0, 100.0)
    }
}

pub fn wallet_summary(state: &AppState) -> WalletSummary {
    let active = state.bank_accounts.iter().filter(|a| !a.is_excluded);
    let (liabilities, assets): (Vec<_>, Vec<_>) =
        active.partition(|a| a.account_type.is_liability());
    let total_assets: f64 = assets.iter().map(|a| a.balance).sum();
    let total_liabilities: f64 = liabilities.iter().map(|a| a.balance).sum();

    let total_of = |kind: TransactionType| -> f64 {
        state
            .transactions
            .iter()
            .filter(|t| t.transaction_type == kind)
            .map(|t| t.amount)
            .sum()
    };
    let total_income = total_of(TransactionType::Income);
    let total_expenses = total_of(TransactionType::Expense);

    WalletSummary {
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
        total_income,
        total_expenses,
        net_cash_flow: total_income - total_expenses,
        currency: state.settings.currency.clone(),
    }
}

/// Share of the current habits completed on `date`. Ids of deleted habits in
/// the log do not count.
pub fn habit_productivity(state: &AppState, date: &str) -> f64 {
    if state.habits.is_empty() {
        return 0.0;
    }
    let completed = state
        .habits
        .iter()
        .filter(|h| state.habit_log.is_completed(date, &h.id))
        .count();
    percent(completed as f64, state.habits.len() as f64)
}

/// Scores for the `days` days ending on `end`, oldest first.
pub fn productivity_series(state: &AppState, end: NaiveDate, days: u32) -> Vec<ProductivityPoint> {
    if days == 0 {
        return Vec::new();
    }
    let start = end - Duration::days(i64::from(days) - 1);
    get_days_between(start, end)
        .into_iter()
        .map(|day| {
            let date = day_string(day);
            let score = habit_productivity(state, &date);
            ProductivityPoint { date, score }
        })
        .collect()
}

pub fn goal_progress(goal: &Goal, now: DateTime<Utc>) -> GoalProgress {
    let remaining_time = parse_instant(&goal.deadline).map(|deadline| deadline - now);
    let (days_left, is_expired) = match remaining_time {
        Some(left) if left > Duration::zero() => (left.num_days(), false),
        Some(_) => (0, true),
        None => (0, false),
    };

    GoalProgress {
        goal_id: goal.id.clone(),
        title: goal.title.clone(),
        percent: percent(goal.current_amount, goal.target_amount),
        remaining: (goal.target_amount - goal.current_amount).max(0.0),
        days_left,
        is_expired,
    }
}

pub fn crm_summary(state: &AppState) -> CrmSummary {
    let projects = state
        .projects
        .iter()
        .map(|project| {
            let (total, completed, value) = state.tasks_for_project(&project.id).fold(
                (0usize, 0usize, 0.0f64),
                |(total, completed, value), task| {
                    (
                        total + 1,
                        completed + usize::from(task.is_completed),
                        value + task.amount.unwrap_or(0.0),
                    )
                },
            );
            ProjectProgress {
                project_id: project.id.clone(),
                title: project.title.clone(),
                total_tasks: total,
                completed_tasks: completed,
                percent: percent(completed as f64, total as f64),
                task_value: value,
            }
        })
        .collect();

    CrmSummary {
        active_projects: state.projects.iter().filter(|p| p.status.is_active()).count(),
        total_budget: state.projects.iter().map(|p| p.budget).sum(),
        pending_tasks: state.tasks.iter().filter(|t| !t.is_completed).count(),
        contacts: state.contacts.len(),
        projects,
    }
}

pub fn dashboard_summary(state: &AppState, today: NaiveDate) -> DashboardSummary {
    let today = day_string(today);
    DashboardSummary {
        note_count: state.notes.len(),
        event_count: state.events.len(),
        task_count: state.tasks.len(),
        pending_tasks: state.tasks.iter().filter(|t| !t.is_completed).count(),
        balance: state.transactions.iter().map(|t| t.signed_amount()).sum(),
        recent_notes: state
            .notes
            .iter()
            .take(DASHBOARD_PREVIEW_LEN)
            .cloned()
            .collect(),
        // Events are kept sorted ascending, so the first matches are the next ones.
        upcoming_events: state
            .events
            .iter()
            .filter(|e| e.date.as_str() >= today.as_str())
            .take(DASHBOARD_PREVIEW_LEN)
            .cloned()
            .collect(),
    }
}
