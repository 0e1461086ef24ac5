//! The pure state transition function.

use chrono::{DateTime, Utc};

use super::actions::Action;
use super::app_state::AppState;
use crate::calendar::{CalendarEvent, Habit};
use crate::chat::{greeting_message, Message};
use crate::crm::{reconcile_task_update, Contact, Project, Task};
use crate::files::{descendant_ids, FileItem};
use crate::finance::{BankAccount, Transaction};
use crate::goals::Goal;
use crate::notes::Note;
use crate::settings::UserProfile;
use crate::utils::time_utils::{iso_timestamp, parse_instant};

/// Records addressed by id in update/delete actions.
trait Identified {
    fn id(&self) -> &str;
}

macro_rules! impl_identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
            }
        )*
    };
}

impl_identified!(
    Note,
    CalendarEvent,
    Habit,
    Transaction,
    BankAccount,
    Contact,
    Project,
    Task,
    Goal,
    FileItem,
    Message,
);

/// Replaces the record with the same id. Unknown ids leave the list unchanged.
fn replace_by_id<T: Identified>(items: &mut [T], record: T) {
    if let Some(slot) = items.iter_mut().find(|item| item.id() == record.id()) {
        *slot = record;
    }
}

fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) {
    items.retain(|item| item.id() != id);
}

/// Ascending by date; unparseable dates first. Stable.
fn sort_events(events: &mut [CalendarEvent]) {
    events.sort_by_key(|e| parse_instant(&e.date));
}

/// Descending by date; unparseable dates last. Stable.
fn sort_transactions(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| parse_instant(&b.date).cmp(&parse_instant(&a.date)));
}

/// Computes the state that follows `state` once `action` is applied at `now`.
///
/// Never mutates `state`. Actions that target an unknown id produce a copy of
/// the prior state.
pub fn reduce(state: &AppState, action: Action, now: DateTime<Utc>) -> AppState {
    let mut next = state.clone();
    let now_ms = now.timestamp_millis();

    match action {
        Action::Login { name, email } => {
            if next.chat_history.is_empty() {
                next.chat_history = vec![greeting_message(&name, now_ms)];
            }
            next.user_profile = UserProfile {
                name,
                email: email.filter(|e| !e.trim().is_empty()),
                is_logged_in: true,
            };
        }
        Action::Logout => next.user_profile.is_logged_in = false,

        Action::AddNote(note) => next.notes.insert(0, note),
        Action::UpdateNote(note) => replace_by_id(&mut next.notes, note),
        Action::DeleteNote(id) => remove_by_id(&mut next.notes, &id),
        Action::ToggleNoteBookmark(id) => {
            if let Some(note) = next.notes.iter_mut().find(|n| n.id == id) {
                note.is_bookmarked = !note.is_bookmarked;
            }
        }

        Action::AddEvent(event) => {
            next.events.push(event);
            sort_events(&mut next.events);
        }
        Action::UpdateEvent(event) => {
            replace_by_id(&mut next.events, event);
            sort_events(&mut next.events);
        }
        Action::DeleteEvent(id) => remove_by_id(&mut next.events, &id),

        Action::AddTransaction(transaction) => {
            next.transactions.insert(0, transaction.normalized());
            sort_transactions(&mut next.transactions);
        }

        Action::AddBankAccount(account) => next.bank_accounts.push(account.normalized()),
        Action::UpdateBankAccount(account) => {
            replace_by_id(&mut next.bank_accounts, account.normalized())
        }
        Action::ToggleBankAccountExclusion(id) => {
            if let Some(account) = next.bank_accounts.iter_mut().find(|a| a.id == id) {
                account.is_excluded = !account.is_excluded;
            }
        }
        Action::DeleteBankAccount(id) => remove_by_id(&mut next.bank_accounts, &id),

        Action::AddContact(contact) => next.contacts.push(contact),
        Action::UpdateContact(contact) => replace_by_id(&mut next.contacts, contact),
        Action::DeleteContact(id) => remove_by_id(&mut next.contacts, &id),

        Action::AddHabit(habit) => next.habits.push(habit),
        // Completion history of the habit is kept.
        Action::DeleteHabit(id) => remove_by_id(&mut next.habits, &id),
        Action::ToggleHabitCompletion { date, habit_id } => {
            next.habit_log.toggle(&date, &habit_id);
        }

        Action::AddProject(project) => next.projects.insert(0, project.normalized()),
        Action::UpdateProject(project) => replace_by_id(&mut next.projects, project.normalized()),
        Action::DeleteProject(id) => {
            remove_by_id(&mut next.projects, &id);
            next.tasks.retain(|t| t.project_id != id);
        }

        Action::AddTask(new_task) => next.tasks.push(Task::from(new_task)),
        Action::UpdateTask(task) => {
            if let Some(slot) = next.tasks.iter_mut().find(|t| t.id == task.id) {
                *slot =
                    reconcile_task_update(task, Some(&*slot), &iso_timestamp(now)).normalized();
            }
        }
        Action::DeleteTask(id) => remove_by_id(&mut next.tasks, &id),

        Action::AddGoal(goal) => next.goals.insert(0, goal.normalized()),
        Action::UpdateGoal(goal) => replace_by_id(&mut next.goals, goal.normalized()),
        Action::DeleteGoal(id) => remove_by_id(&mut next.goals, &id),
        Action::AddGoalEntry { goal_id, entry } => {
            if let Some(slot) = next.goals.iter_mut().find(|g| g.id == goal_id) {
                *slot = std::mem::take(slot).with_entry(entry);
            }
        }

        Action::AddFile(file) => next.files.push(file.normalized()),
        Action::UpdateFile(file) => replace_by_id(&mut next.files, file.normalized()),
        Action::DeleteFile(id) => {
            let doomed = descendant_ids(&next.files, &id);
            next.files.retain(|f| !doomed.contains(&f.id));
        }

        Action::AddMessage(message) => next.chat_history.push(message),
        Action::ClearChat => {
            next.chat_history = vec![greeting_message(&next.user_profile.name, now_ms)];
        }

        Action::UpdateSettings(update) => next.settings = next.settings.merged(update),
        Action::LoadData(document) => {
            next = *document;
            next.transactions = next
                .transactions
                .into_iter()
                .map(Transaction::normalized)
                .collect();
            next.bank_accounts = next
                .bank_accounts
                .into_iter()
                .map(BankAccount::normalized)
                .collect();
            next.projects = next.projects.into_iter().map(Project::normalized).collect();
            next.tasks = next.tasks.into_iter().map(Task::normalized).collect();
            next.goals = next.goals.into_iter().map(Goal::normalized).collect();
            next.files = next.files.into_iter().map(FileItem::normalized).collect();
        }
    }

    next
}
