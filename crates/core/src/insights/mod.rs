//! Insights module - read-only projections over a document snapshot.

mod insights_model;
mod insights_service;

pub use insights_model::{
    CrmSummary, DashboardSummary, GoalProgress, ProductivityPoint, ProjectProgress, WalletSummary,
};
pub use crate::files::{breadcrumbs as file_breadcrumbs, children};
pub use insights_service::{
    crm_summary, dashboard_summary, goal_progress, habit_productivity, productivity_series,
    wallet_summary,
};
