//! Plain-text and JSON rendering for CLI output.

use chrono::NaiveDate;
use serde::Serialize;

use crate::category::Category;
use crate::dates::format_due;
use crate::error::Result;
use crate::fields::*;
use crate::filter::{BoardSummary, StatusColumns};
use crate::task::Task;

/// Output switches shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print tasks in a formatted table.
pub fn print_task_table(tasks: &[&Task], today: NaiveDate) {
    println!(
        "{:<10} {:<12} {:<7} {:<10} {:<12} {}",
        "ID", "Status", "Pri", "Due", "Category", "Title"
    );
    for t in tasks {
        let archived = if t.archived { " [archived]" } else { "" };
        println!(
            "{:<10} {:<12} {:<7} {:<10} {:<12} {}{}",
            truncate(&t.id, 10),
            format_status(t.status),
            format_priority(t.priority),
            format_due(t.due_date, today),
            truncate(&t.category, 12),
            t.title,
            archived
        );
    }
}

/// Print the three board columns one after another.
pub fn print_columns(columns: &StatusColumns<'_>, today: NaiveDate) {
    for status in Status::ALL {
        let cards = columns.column(status);
        println!("== {} ({}) ==", format_status(status), cards.len());
        if cards.is_empty() {
            println!("  No {} tasks", format_status(status).to_lowercase());
        }
        for t in cards {
            println!(
                "  {:<10} {:<7} {:<10} {}",
                truncate(&t.id, 10),
                format_priority(t.priority),
                format_due(t.due_date, today),
                t.title
            );
        }
        println!();
    }
}

/// Print every field of a single task.
pub fn print_task_detail(task: &Task, today: NaiveDate) {
    println!("Task {}: {}", task.id, task.title);
    println!("  Status:      {}", format_status(task.status));
    println!("  Priority:    {}", format_priority(task.priority));
    println!("  Category:    {}", task.category);
    println!("  Due:         {} ({})", task.due_date, format_due(task.due_date, today));
    println!("  Created:     {}", task.created_at.to_rfc3339());
    if let Some(done) = task.completed_at {
        println!("  Completed:   {}", done.to_rfc3339());
    }
    if task.archived {
        println!("  Archived:    yes");
    }
    if !task.description.is_empty() {
        println!();
        println!("{}", task.description);
    }
}

/// Print categories with their colour and task count.
pub fn print_category_table(categories: &[Category]) {
    println!("{:<10} {:<16} {:<9} {}", "ID", "Name", "Color", "Tasks");
    for c in categories {
        println!(
            "{:<10} {:<16} {:<9} {}",
            truncate(&c.id, 10),
            truncate(&c.name, 16),
            c.color,
            c.task_count
        );
    }
}

/// Print every field of a single category.
pub fn print_category_detail(category: &Category) {
    println!("Category {}: {}", category.id, category.name);
    println!("  Color: {}", category.color);
    println!("  Tasks: {}", category.task_count);
}

/// Print board-wide counts.
pub fn print_summary(summary: &BoardSummary) {
    println!("Total:        {}", summary.total);
    println!("To Do:        {}", summary.todo);
    println!("In Progress:  {}", summary.in_progress);
    println!("Completed:    {}", summary.completed);
    println!("Archived:     {}", summary.archived);
    println!("Overdue:      {}", summary.overdue);
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
