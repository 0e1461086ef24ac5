//! Tool names as the model sees them.

pub const ADD_NOTE: &str = "addNote";
pub const UPDATE_NOTE: &str = "updateNote";
pub const DELETE_NOTE: &str = "deleteNote";

pub const ADD_EVENT: &str = "addEvent";
pub const UPDATE_EVENT: &str = "updateEvent";
pub const DELETE_EVENT: &str = "deleteEvent";
pub const ADD_HABIT: &str = "addHabit";

pub const ADD_TRANSACTION: &str = "addTransaction";
pub const ADD_BANK_ACCOUNT: &str = "addBankAccount";

pub const ADD_CONTACT: &str = "addContact";
pub const ADD_PROJECT: &str = "addProject";
pub const ADD_TASK_TO_PROJECT: &str = "addTaskToProject";
pub const UPDATE_TASK: &str = "updateTask";
pub const DELETE_TASK: &str = "deleteTask";

pub const UPDATE_FILE: &str = "updateFile";
pub const DELETE_FILE: &str = "deleteFile";

/// Result returned for a tool name the registry does not know.
pub const TOOL_NOT_RECOGNIZED: &str = "Tool not recognized.";
