//! Enumerations and field types for tasks.
//!
//! This module defines the structured values a task carries besides free text:
//! its priority and its position on the board (status), along with the
//! display and parsing helpers the CLI and board share.

use serde::{Deserialize, Serialize};

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Next priority in the cycle low -> medium -> high -> low.
    pub fn cycle(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Board column a task sits in.
///
/// Every transition between the three values is permitted; the only coupled
/// effect is the task's completion timestamp.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl Status {
    /// Column order on the board.
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Completed];

    /// Column index on the board (0..3).
    pub fn column(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Completed => 2,
        }
    }

    /// Status for a board column index.
    pub fn from_column(index: usize) -> Option<Self> {
        Status::ALL.get(index).copied()
    }

    /// Status one column to the left, if any.
    pub fn previous(self) -> Option<Self> {
        self.column().checked_sub(1).and_then(Status::from_column)
    }

    /// Status one column to the right, if any.
    pub fn next(self) -> Option<Self> {
        Status::from_column(self.column() + 1)
    }

    /// Wire spelling, as used in seed files and `--json` output.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }
}

/// Format a task status for display.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::Todo => "To Do",
        Status::InProgress => "In Progress",
        Status::Completed => "Completed",
    }
}

/// Format a priority level for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

/// Parse a status string, accepting both wire and display spellings.
pub fn parse_status(s: &str) -> Option<Status> {
    match s.trim().to_lowercase().as_str() {
        "todo" | "to do" | "to-do" => Some(Status::Todo),
        "in-progress" | "in progress" | "inprogress" => Some(Status::InProgress),
        "completed" | "done" => Some(Status::Completed),
        _ => None,
    }
}

/// Parse a priority string.
pub fn parse_priority(s: &str) -> Option<Priority> {
    match s.trim().to_lowercase().as_str() {
        "low" => Some(Priority::Low),
        "medium" | "med" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}
