//! CRM module - contacts, projects and their tasks.

mod crm_model;
mod task_status;

pub use crm_model::{
    Contact, ContactStatus, NewTask, Project, ProjectStatus, Subtask, Task, TaskStatus,
};
pub use task_status::reconcile_task_update;
