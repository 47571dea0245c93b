//! Derived views over the task collection.
//!
//! Everything here is a pure function of its inputs: the board and the CLI
//! call these on every query change to decide which cards to show and in
//! which column.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::category::Category;
use crate::fields::Status;
use crate::task::Task;

/// Search criteria. `None` for category or status means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub query: String,
    pub category: Option<String>,
    pub status: Option<Status>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.category.is_none() && self.status.is_none()
    }

    /// All three criteria must hold.
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_query(task)
            && self.category.as_ref().map_or(true, |c| &task.category == c)
            && self.status.map_or(true, |s| task.status == s)
    }

    fn matches_query(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
    }
}

/// Tasks satisfying `filter`, in their original order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

/// Tasks bucketed by board column.
#[derive(Debug, Default, PartialEq)]
pub struct StatusColumns<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

impl<'a> StatusColumns<'a> {
    /// Cards in the column for `status`.
    pub fn column(&self, status: Status) -> &[&'a Task] {
        match status {
            Status::Todo => &self.todo,
            Status::InProgress => &self.in_progress,
            Status::Completed => &self.completed,
        }
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split tasks into the three status columns, keeping relative order.
pub fn partition_by_status<'a, I>(tasks: I) -> StatusColumns<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut columns = StatusColumns::default();
    for task in tasks {
        match task.status {
            Status::Todo => columns.todo.push(task),
            Status::InProgress => columns.in_progress.push(task),
            Status::Completed => columns.completed.push(task),
        }
    }
    columns
}

/// Drop archived tasks from a view.
pub fn without_archived<'a, I>(tasks: I) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks.into_iter().filter(|t| !t.archived).collect()
}

/// Category names referenced by tasks but missing from the catalog.
pub fn orphaned_categories(tasks: &[Task], categories: &[Category]) -> BTreeSet<String> {
    let known: BTreeSet<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    tasks
        .iter()
        .filter(|t| !known.contains(t.category.as_str()))
        .map(|t| t.category.clone())
        .collect()
}

/// Counts shown in the board header and by `kb stats`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub archived: usize,
    pub overdue: usize,
}

/// Count tasks per column, archived and overdue as of `today`.
pub fn summarize(tasks: &[Task], today: NaiveDate) -> BoardSummary {
    let mut summary = BoardSummary {
        total: tasks.len(),
        ..Default::default()
    };
    for task in tasks {
        match task.status {
            Status::Todo => summary.todo += 1,
            Status::InProgress => summary.in_progress += 1,
            Status::Completed => summary.completed += 1,
        }
        if task.archived {
            summary.archived += 1;
        }
        if task.is_overdue(today) {
            summary.overdue += 1;
        }
    }
    summary
}
