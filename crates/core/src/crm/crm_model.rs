//! CRM domain models.

use serde::{Deserialize, Serialize};

use crate::utils::number_utils::{finite_or_none, finite_or_zero};
use crate::utils::serde_utils::null_as_default;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactStatus {
    #[default]
    Lead,
    Client,
    Partner,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ContactStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contacted: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    NotStarted,
    InProgress,
    OnHold,
    Completed,
}

impl ProjectStatus {
    /// Projects that still need work.
    pub fn is_active(&self) -> bool {
        matches!(self, ProjectStatus::NotStarted | ProjectStatus::InProgress)
    }
}

/// A client project. Owns every task whose `project_id` equals its id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub budget: f64,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub created_at: String,
}

impl Project {
    /// Replaces a non-finite budget with 0.
    pub fn normalized(mut self) -> Self {
        self.budget = finite_or_zero(self.budget);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn from_completed(is_completed: bool) -> Self {
        if is_completed {
            TaskStatus::Done
        } else {
            TaskStatus::Todo
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
}

/// A task under a project.
///
/// `status` and `is_completed` always agree once a task is stored:
/// `Done` if and only if `is_completed`. Documents written before `status`
/// existed are read through [`NewTask`], which derives it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", from = "NewTask")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub is_completed: bool,
    pub status: TaskStatus,
    pub subtasks: Vec<Subtask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

/// Input model for creating a task; `status` may be omitted by callers that
/// only know about `is_completed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_completed: bool,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl From<NewTask> for Task {
    fn from(new_task: NewTask) -> Self {
        let status = new_task
            .status
            .unwrap_or_else(|| TaskStatus::from_completed(new_task.is_completed));
        let is_completed = status.is_done();
        Task {
            id: new_task.id,
            project_id: new_task.project_id,
            title: new_task.title,
            is_completed,
            status,
            subtasks: new_task.subtasks,
            amount: finite_or_none(new_task.amount),
            completed_at: if is_completed {
                new_task.completed_at
            } else {
                None
            },
        }
    }
}

impl Task {
    /// Drops a non-finite amount.
    pub fn normalized(mut self) -> Self {
        self.amount = finite_or_none(self.amount);
        self
    }
}
