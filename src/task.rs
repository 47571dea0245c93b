//! Task data structure and related functionality.
//!
//! This module defines the `Task` record shown as a card on the board, and the
//! `TaskPatch` partial record callers hand to the task service for creates
//! and updates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::*;

/// A work item on the board.
///
/// `completed_at` is set exactly when `status` is `Completed`; the task
/// service maintains that on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
}

impl Task {
    /// True when the task sits in the Completed column.
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// True when the task is open and its due date lies before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed() && self.due_date < today
    }

    /// Bring `completed_at` in line with `status`.
    ///
    /// An already-set timestamp is kept while the task stays completed.
    pub fn sync_completion(&mut self, now: DateTime<Utc>) {
        match (self.status, self.completed_at) {
            (Status::Completed, None) => self.completed_at = Some(now),
            (Status::Completed, Some(_)) => {}
            (_, _) => self.completed_at = None,
        }
    }
}

/// Caller-supplied fields for a task create or update.
///
/// Unset fields keep their stored value on update and take their default on
/// create. `id` is accepted so whole records can be echoed back, but the
/// service never lets it change a task's identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl TaskPatch {
    /// Patch carrying only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        TaskPatch {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Overlay the supplied fields onto `task`. Identity and timestamps are
    /// left to the caller.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(due) = self.due_date {
            task.due_date = due;
        }
        if let Some(archived) = self.archived {
            task.archived = archived;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Task {
        Task {
            id: "1".into(),
            title: "Write tests".into(),
            description: String::new(),
            category: "Work".into(),
            priority: Priority::Medium,
            status: Status::Todo,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            completed_at: None,
            archived: false,
        }
    }

    #[test]
    fn test_sync_completion_sets_and_clears() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();
        let mut task = sample();
        task.status = Status::Completed;
        task.sync_completion(now);
        assert_eq!(task.completed_at, Some(now));

        let later = Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap();
        task.sync_completion(later);
        assert_eq!(task.completed_at, Some(now), "existing timestamp is kept");

        task.status = Status::InProgress;
        task.sync_completion(later);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn test_patch_leaves_unset_fields() {
        let mut task = sample();
        TaskPatch::titled("Renamed").with_priority(Priority::High).apply_to(&mut task);
        assert_eq!(task.title, "Renamed");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.category, "Work");
        assert_eq!(task.status, Status::Todo);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["dueDate"], "2024-03-04");
        assert!(json["completedAt"].is_null());
        assert_eq!(json["status"], "todo");

        let patch: TaskPatch =
            serde_json::from_str(r#"{"status":"in-progress","dueDate":"2024-05-01"}"#).unwrap();
        assert_eq!(patch.status, Some(Status::InProgress));
        assert_eq!(patch.due_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert!(patch.title.is_none());
    }

    #[test]
    fn test_overdue_ignores_completed() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mut task = sample();
        assert!(task.is_overdue(today));
        task.status = Status::Completed;
        assert!(!task.is_overdue(today));
    }
}
