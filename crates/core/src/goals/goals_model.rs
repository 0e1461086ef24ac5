//! Goals domain models.

use serde::{Deserialize, Serialize};

use crate::utils::number_utils::finite_or_zero;
use crate::utils::serde_utils::null_as_default;
use crate::utils::time_utils::parse_instant;

/// A single contribution towards a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalEntry {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Domain model representing a savings goal.
///
/// `current_amount` is derived: it always equals the sum of `entries`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_amount: f64,
    #[serde(default)]
    pub deadline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entries: Vec<GoalEntry>,
    #[serde(default)]
    pub created_at: String,
}

impl Goal {
    /// Sorts entries newest first and recomputes `current_amount`.
    /// Non-finite amounts become 0.
    pub fn normalized(mut self) -> Self {
        self.target_amount = finite_or_zero(self.target_amount);
        for entry in &mut self.entries {
            entry.amount = finite_or_zero(entry.amount);
        }
        self.entries
            .sort_by(|a, b| parse_instant(&b.date).cmp(&parse_instant(&a.date)));
        self.current_amount = self.entries.iter().map(|e| e.amount).sum();
        self
    }

    pub fn with_entry(mut self, entry: GoalEntry) -> Self {
        self.entries.push(entry);
        self.normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, amount: f64, date: &str) -> GoalEntry {
        GoalEntry {
            id: id.to_string(),
            amount,
            date: date.to_string(),
            note: None,
        }
    }

    #[test]
    fn test_with_entry_sorts_and_sums() {
        let goal = Goal {
            id: "g1".to_string(),
            title: "Vacation".to_string(),
            target_amount: 2000.0,
            current_amount: 999.0,
            ..Default::default()
        };
        let goal = goal
            .with_entry(entry("e1", 100.0, "2024-01-10"))
            .with_entry(entry("e2", 250.0, "2024-03-01"))
            .with_entry(entry("e3", 50.0, "2024-02-15"));

        assert_eq!(goal.current_amount, 400.0);
        let ids: Vec<&str> = goal.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e2", "e3", "e1"]);
    }

    #[test]
    fn test_goal_without_entries_loads() {
        let goal: Goal = serde_json::from_str(
            r#"{"id":"g1","title":"Car","targetAmount":5000,"currentAmount":10,"entries":null}"#,
        )
        .unwrap();
        assert!(goal.entries.is_empty());
        assert_eq!(goal.normalized().current_amount, 0.0);
    }

    #[test]
    fn test_non_finite_entry_does_not_poison_total() {
        let goal = Goal {
            id: "g1".to_string(),
            target_amount: f64::NAN,
            ..Default::default()
        }
        .with_entry(entry("e1", 100.0, "2024-01-10"))
        .with_entry(entry("e2", f64::INFINITY, "2024-01-11"));

        assert_eq!(goal.target_amount, 0.0);
        assert_eq!(goal.current_amount, 100.0);
        assert_eq!(goal.entries[0].amount, 0.0);
    }
}
