//! Status/completion reconciliation for task updates.

use super::crm_model::{Task, TaskStatus};

/// Reconciles an incoming full task record against the stored one.
///
/// - a changed `status` wins and drives `is_completed`;
/// - otherwise a changed `is_completed` wins and moves `status` to `Done`
///   or `Todo`;
/// - otherwise `is_completed` is re-derived from `status`.
///
/// When both fields changed, `status` wins. `completed_at` is stamped with
/// `now` on a transition into completion, kept across completed-to-completed
/// updates and cleared when the task is not completed.
pub fn reconcile_task_update(mut incoming: Task, prior: Option<&Task>, now: &str) -> Task {
    let status_changed = prior.is_some_and(|p| p.status != incoming.status);
    let completion_changed = prior.is_some_and(|p| p.is_completed != incoming.is_completed);

    if !status_changed && completion_changed {
        incoming.status = TaskStatus::from_completed(incoming.is_completed);
    } else if incoming.status.is_done() != incoming.is_completed {
        incoming.is_completed = incoming.status.is_done();
    }

    let was_completed = prior.is_some_and(|p| p.is_completed);
    incoming.completed_at = match (incoming.is_completed, was_completed) {
        (true, false) => Some(now.to_string()),
        (true, true) => incoming
            .completed_at
            .or_else(|| prior.and_then(|p| p.completed_at.clone()))
            .or_else(|| Some(now.to_string())),
        (false, _) => None,
    };

    incoming
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: &str = "2024-05-01T12:00:00.000Z";

    fn task(status: TaskStatus, is_completed: bool) -> Task {
        Task {
            id: "t1".to_string(),
            project_id: "p1".to_string(),
            title: "Design mockups".to_string(),
            is_completed,
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_status_done_marks_completed_and_stamps() {
        let prior = task(TaskStatus::Todo, false);
        let incoming = task(TaskStatus::Done, false);
        let result = reconcile_task_update(incoming, Some(&prior), NOW);
        assert!(result.is_completed);
        assert_eq!(result.completed_at.as_deref(), Some(NOW));
    }

    #[test]
    fn test_toggle_completed_only_moves_status() {
        let prior = task(TaskStatus::Todo, false);
        let incoming = task(TaskStatus::Todo, true);
        let result = reconcile_task_update(incoming, Some(&prior), NOW);
        assert_eq!(result.status, TaskStatus::Done);
        assert!(result.is_completed);
    }

    #[test]
    fn test_untoggle_done_task_reopens_it() {
        let mut prior = task(TaskStatus::Done, true);
        prior.completed_at = Some("2024-04-01T00:00:00.000Z".to_string());
        let mut incoming = prior.clone();
        incoming.is_completed = false;
        let result = reconcile_task_update(incoming, Some(&prior), NOW);
        assert_eq!(result.status, TaskStatus::Todo);
        assert!(!result.is_completed);
        assert!(result.completed_at.is_none());
    }

    #[test]
    fn test_status_wins_when_both_changed() {
        let prior = task(TaskStatus::Done, true);
        // Caller moved status back to IN_PROGRESS but also claims completion.
        let incoming = task(TaskStatus::InProgress, false);
        let result = reconcile_task_update(incoming, Some(&prior), NOW);
        assert_eq!(result.status, TaskStatus::InProgress);
        assert!(!result.is_completed);

        let prior = task(TaskStatus::Todo, false);
        let incoming = task(TaskStatus::InProgress, true);
        let result = reconcile_task_update(incoming, Some(&prior), NOW);
        assert_eq!(result.status, TaskStatus::InProgress);
        assert!(!result.is_completed);
        assert!(result.completed_at.is_none());
    }

    #[test]
    fn test_completed_at_kept_when_staying_done() {
        let mut prior = task(TaskStatus::Done, true);
        prior.completed_at = Some("2024-04-01T00:00:00.000Z".to_string());
        let mut incoming = prior.clone();
        incoming.title = "Design final mockups".to_string();
        let result = reconcile_task_update(incoming, Some(&prior), NOW);
        assert_eq!(
            result.completed_at.as_deref(),
            Some("2024-04-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_unknown_prior_uses_status() {
        let result = reconcile_task_update(task(TaskStatus::Done, false), None, NOW);
        assert!(result.is_completed);
        assert_eq!(result.completed_at.as_deref(), Some(NOW));
    }
}
