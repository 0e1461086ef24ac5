use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use secondbrain_core::crm::{Contact, ContactStatus, NewTask, Project, ProjectStatus, TaskStatus};
use secondbrain_core::utils::new_id;
use secondbrain_core::{find_by_name, Action};

use super::constants::{ADD_CONTACT, ADD_PROJECT, ADD_TASK_TO_PROJECT, DELETE_TASK, UPDATE_TASK};
use super::{non_blank, not_found, parse_args, require_finite, require_text, Tool, ToolContext};
use crate::error::AiError;

// ----------------------------------------------------------------------------
// AddContactTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct AddContactArgs {
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    status: Option<ContactStatus>,
}

pub struct AddContactTool;

#[async_trait]
impl Tool for AddContactTool {
    fn name(&self) -> &str {
        ADD_CONTACT
    }

    fn description(&self) -> &str {
        "Add a new CRM contact."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "email": { "type": "string" },
                "company": { "type": "string" },
                "status": { "type": "string", "enum": ["LEAD", "CLIENT", "PARTNER", "INACTIVE"] }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: AddContactArgs = parse_args(args)?;
        let contact = Contact {
            id: new_id(),
            name: require_text("name", &args.name)?,
            email: args.email.unwrap_or_default(),
            company: non_blank(args.company),
            role: None,
            status: args.status.unwrap_or_default(),
            last_contacted: None,
        };
        ctx.store.dispatch(Action::AddContact(contact));
        Ok("Contact added.".to_string())
    }
}

// ----------------------------------------------------------------------------
// AddProjectTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddProjectArgs {
    title: String,
    #[serde(default)]
    client_name: Option<String>,
    #[serde(default)]
    budget: Option<f64>,
    #[serde(default)]
    deadline: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

pub struct AddProjectTool;

#[async_trait]
impl Tool for AddProjectTool {
    fn name(&self) -> &str {
        ADD_PROJECT
    }

    fn description(&self) -> &str {
        "Create a new project."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "clientName": { "type": "string" },
                "budget": { "type": "number" },
                "deadline": { "type": "string" },
                "description": { "type": "string" }
            },
            "required": ["title"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: AddProjectArgs = parse_args(args)?;
        let budget = args
            .budget
            .map(|b| require_finite("budget", b))
            .transpose()?
            .unwrap_or(0.0);

        let project = Project {
            id: new_id(),
            title: require_text("title", &args.title)?,
            client_name: args.client_name.unwrap_or_default(),
            budget,
            deadline: args.deadline.unwrap_or_default(),
            description: args.description.unwrap_or_default(),
            status: ProjectStatus::NotStarted,
            created_at: ctx.timestamp(),
        };
        ctx.store.dispatch(Action::AddProject(project));
        Ok("Project created.".to_string())
    }
}

// ----------------------------------------------------------------------------
// AddTaskToProjectTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddTaskToProjectArgs {
    project_title: String,
    task_title: String,
    #[serde(default)]
    amount: Option<f64>,
}

pub struct AddTaskToProjectTool;

#[async_trait]
impl Tool for AddTaskToProjectTool {
    fn name(&self) -> &str {
        ADD_TASK_TO_PROJECT
    }

    fn description(&self) -> &str {
        "Add a task to a project."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "projectTitle": { "type": "string" },
                "taskTitle": { "type": "string" },
                "amount": { "type": "number" }
            },
            "required": ["projectTitle", "taskTitle"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: AddTaskToProjectArgs = parse_args(args)?;
        let title = require_text("taskTitle", &args.task_title)?;
        let amount = args
            .amount
            .map(|a| require_finite("amount", a))
            .transpose()?;

        let state = ctx.store.snapshot();
        let Some(project) = find_by_name(&state.projects, &args.project_title) else {
            return Ok(not_found("Project", &args.project_title));
        };

        let task = NewTask {
            id: new_id(),
            project_id: project.id.clone(),
            title,
            is_completed: false,
            status: Some(TaskStatus::Todo),
            subtasks: Vec::new(),
            amount,
            completed_at: None,
        };
        ctx.store.dispatch(Action::AddTask(task));
        Ok("Task added.".to_string())
    }
}

// ----------------------------------------------------------------------------
// UpdateTaskTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTaskArgs {
    task_title: String,
    #[serde(default)]
    new_status: Option<TaskStatus>,
    #[serde(default)]
    mark_completed: Option<bool>,
    #[serde(default)]
    new_title: Option<String>,
}

pub struct UpdateTaskTool;

#[async_trait]
impl Tool for UpdateTaskTool {
    fn name(&self) -> &str {
        UPDATE_TASK
    }

    fn description(&self) -> &str {
        "Update a task's status or details. Finds task by title."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "taskTitle": { "type": "string", "description": "The exact task title to find." },
                "newStatus": { "type": "string", "enum": ["TODO", "IN_PROGRESS", "DONE"] },
                "markCompleted": { "type": "boolean" },
                "newTitle": { "type": "string" }
            },
            "required": ["taskTitle"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: UpdateTaskArgs = parse_args(args)?;
        let state = ctx.store.snapshot();
        let Some(task) = find_by_name(&state.tasks, &args.task_title) else {
            return Ok(not_found("Task", &args.task_title));
        };

        // The reducer reconciles status and completion; status wins if both change.
        let mut updated = task.clone();
        if let Some(title) = non_blank(args.new_title) {
            updated.title = title;
        }
        if let Some(status) = args.new_status {
            updated.status = status;
        }
        if let Some(completed) = args.mark_completed {
            updated.is_completed = completed;
        }

        ctx.store.dispatch(Action::UpdateTask(updated));
        Ok("Task updated.".to_string())
    }
}

// ----------------------------------------------------------------------------
// DeleteTaskTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteTaskArgs {
    task_title: String,
}

pub struct DeleteTaskTool;

#[async_trait]
impl Tool for DeleteTaskTool {
    fn name(&self) -> &str {
        DELETE_TASK
    }

    fn description(&self) -> &str {
        "Delete a task by title."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "taskTitle": { "type": "string" } },
            "required": ["taskTitle"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: DeleteTaskArgs = parse_args(args)?;
        let state = ctx.store.snapshot();
        let Some(task) = find_by_name(&state.tasks, &args.task_title) else {
            return Ok(not_found("Task", &args.task_title));
        };
        ctx.store.dispatch(Action::DeleteTask(task.id.clone()));
        Ok("Task deleted.".to_string())
    }
}
