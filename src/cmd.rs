//! Command implementations for the CLI interface.
//!
//! Each handler validates its arguments at the presentation boundary (titles,
//! due-date input), calls the task or category service, and prints the
//! canonical record the service hands back.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use clap_complete::{generate, Shell};
use serde::Serialize;

use crate::category::CategoryPatch;
use crate::config::Config;
use crate::dates::parse_due_input;
use crate::display::*;
use crate::error::{Error, Result};
use crate::fields::*;
use crate::filter::{
    filter_tasks, orphaned_categories, partition_by_status, summarize, without_archived,
    BoardSummary, TaskFilter,
};
use crate::store::EntityStore;
use crate::task::TaskPatch;
use crate::tui::board_run::run_board;

/// Top-level `kb` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive kanban board.
    Board,

    /// List tasks with optional filters.
    List {
        /// Case-insensitive text matched against title and description.
        #[arg(long, short)]
        query: Option<String>,
        /// Only tasks in this category ("all" for every category).
        #[arg(long)]
        category: Option<String>,
        /// Only tasks with this status.
        #[arg(long, value_parser = status_arg)]
        status: Option<Status>,
        /// Group the result into board columns.
        #[arg(long)]
        columns: bool,
        /// Leave archived tasks out.
        #[arg(long)]
        hide_archived: bool,
    },

    /// View a single task.
    Show {
        /// Task ID
        id: String,
    },

    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// Category name (defaults to the first category on the board).
        #[arg(long)]
        category: Option<String>,
        /// Priority: low | medium | high.
        #[arg(long, value_parser = priority_arg)]
        priority: Option<Priority>,
        /// Status: todo | in-progress | completed.
        #[arg(long, value_parser = status_arg)]
        status: Option<Status>,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "friday" or "in Nd".
        #[arg(long)]
        due: Option<String>,
    },

    /// Update fields on a task.
    Update {
        /// Task ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_parser = priority_arg)]
        priority: Option<Priority>,
        #[arg(long, value_parser = status_arg)]
        status: Option<Status>,
        #[arg(long)]
        due: Option<String>,
    },

    /// Move a task to another column.
    Move {
        /// Task ID
        id: String,
        /// Target status: todo | in-progress | completed.
        #[arg(value_parser = status_arg)]
        status: Status,
    },

    /// Delete a task.
    Delete {
        /// Task ID
        id: String,
    },

    /// Archive a task.
    Archive {
        /// Task ID
        id: String,
    },

    /// Restore an archived task.
    Unarchive {
        /// Task ID
        id: String,
    },

    /// Show task counts per column and category.
    Stats,

    /// List categories.
    Categories {
        /// Recompute task counts from the current tasks first.
        #[arg(long)]
        recount: bool,
    },

    /// Manage a single category.
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// `kb category` subcommands.
#[derive(Subcommand)]
pub enum CategoryAction {
    /// View a category.
    Show {
        /// Category ID
        id: String,
    },
    /// Create a category.
    Add {
        /// Display name
        name: String,
        /// Colour token, e.g. "#10B981"
        #[arg(long)]
        color: Option<String>,
    },
    /// Rename or recolour a category.
    Update {
        /// Category ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a category. Tasks keep their category name.
    Delete {
        /// Category ID
        id: String,
    },
}

fn status_arg(s: &str) -> std::result::Result<Status, String> {
    parse_status(s).ok_or_else(|| format!("expected todo, in-progress or completed, got '{s}'"))
}

fn priority_arg(s: &str) -> std::result::Result<Priority, String> {
    parse_priority(s).ok_or_else(|| format!("expected low, medium or high, got '{s}'"))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_due(input: Option<String>) -> Result<Option<NaiveDate>> {
    match input {
        None => Ok(None),
        Some(raw) => parse_due_input(&raw, today())
            .map(Some)
            .ok_or_else(|| Error::InvalidArgument(format!("unrecognised due date '{raw}'"))),
    }
}

fn require_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::InvalidArgument("Task title is required".into()));
    }
    Ok(title.to_string())
}

fn require_category_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidArgument("Category name is required".into()));
    }
    Ok(name.to_string())
}

/// Launch the board on the store.
pub fn cmd_board(store: &mut EntityStore, config: &Config) -> Result<()> {
    run_board(store, config.board.show_archived)?;
    Ok(())
}

/// List tasks matching the filters.
pub fn cmd_list(
    store: &mut EntityStore,
    out: OutputOptions,
    query: Option<String>,
    category: Option<String>,
    status: Option<Status>,
    columns: bool,
    hide_archived: bool,
) -> Result<()> {
    let filter = TaskFilter {
        query: query.unwrap_or_default(),
        category: category.filter(|c| !c.eq_ignore_ascii_case("all")),
        status,
    };
    let all = store.task_service().list();
    let mut tasks = filter_tasks(&all, &filter);
    if hide_archived {
        tasks = without_archived(tasks);
    }

    if columns {
        let grouped = partition_by_status(tasks);
        if grouped.is_empty() && !out.json {
            println!("No tasks found.");
            return Ok(());
        }
        if out.json {
            #[derive(Serialize)]
            #[serde(rename_all = "camelCase")]
            struct Columns<'a> {
                todo: &'a [&'a crate::task::Task],
                in_progress: &'a [&'a crate::task::Task],
                completed: &'a [&'a crate::task::Task],
            }
            return print_json(&Columns {
                todo: &grouped.todo,
                in_progress: &grouped.in_progress,
                completed: &grouped.completed,
            });
        }
        print_columns(&grouped, today());
        return Ok(());
    }

    if out.json {
        return print_json(&tasks);
    }
    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }
    print_task_table(&tasks, today());
    Ok(())
}

/// Show a single task.
pub fn cmd_show(store: &mut EntityStore, out: OutputOptions, id: String) -> Result<()> {
    let task = store
        .task_service()
        .get(&id)
        .ok_or(Error::TaskNotFound(id))?;
    if out.json {
        return print_json(&task);
    }
    print_task_detail(&task, today());
    Ok(())
}

/// Add a new task to the board.
#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    store: &mut EntityStore,
    out: OutputOptions,
    title: String,
    desc: Option<String>,
    category: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    due: Option<String>,
) -> Result<()> {
    let category = category.unwrap_or_else(|| store.preferred_category());
    let mut patch = TaskPatch::titled(require_title(&title)?).with_category(category);
    if let Some(desc) = desc {
        patch = patch.with_description(desc);
    }
    if let Some(priority) = priority {
        patch = patch.with_priority(priority);
    }
    if let Some(status) = status {
        patch = patch.with_status(status);
    }
    if let Some(due) = parse_due(due)? {
        patch = patch.with_due_date(due);
    }
    let task = store.task_service().create(patch);
    if out.json {
        return print_json(&task);
    }
    println!("Created task {}.", task.id);
    print_task_detail(&task, today());
    Ok(())
}

/// Update fields on an existing task.
#[allow(clippy::too_many_arguments)]
pub fn cmd_update(
    store: &mut EntityStore,
    out: OutputOptions,
    id: String,
    title: Option<String>,
    desc: Option<String>,
    category: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    due: Option<String>,
) -> Result<()> {
    let patch = TaskPatch {
        title: title.as_deref().map(require_title).transpose()?,
        description: desc,
        category,
        priority,
        status,
        due_date: parse_due(due)?,
        ..Default::default()
    };
    let task = store.task_service().update(&id, patch)?;
    if out.json {
        return print_json(&task);
    }
    println!("Updated task {}.", task.id);
    print_task_detail(&task, today());
    Ok(())
}

/// Move a task to another column.
pub fn cmd_move(store: &mut EntityStore, out: OutputOptions, id: String, status: Status) -> Result<()> {
    let task = store.task_service().set_status(&id, status)?;
    if out.json {
        return print_json(&task);
    }
    println!("Moved task {} to {}.", task.id, format_status(task.status));
    Ok(())
}

/// Delete a task, echoing the removed record.
pub fn cmd_delete(store: &mut EntityStore, out: OutputOptions, id: String) -> Result<()> {
    let task = store.task_service().delete(&id)?;
    if out.json {
        return print_json(&task);
    }
    println!("Deleted task {} ({}).", task.id, task.title);
    Ok(())
}

/// Archive or restore a task.
pub fn cmd_archive(store: &mut EntityStore, out: OutputOptions, id: String, archived: bool) -> Result<()> {
    let mut tasks = store.task_service();
    let task = if archived { tasks.archive(&id)? } else { tasks.unarchive(&id)? };
    if out.json {
        return print_json(&task);
    }
    let verb = if archived { "Archived" } else { "Restored" };
    println!("{} task {} ({}).", verb, task.id, task.title);
    Ok(())
}

#[derive(Serialize)]
struct StatusCount {
    status: Status,
    count: usize,
}

#[derive(Serialize)]
struct CategoryCount {
    name: String,
    count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    summary: BoardSummary,
    by_status: Vec<StatusCount>,
    by_category: Vec<CategoryCount>,
    orphaned_categories: Vec<String>,
}

/// Report column and category counts.
pub fn cmd_stats(store: &mut EntityStore, out: OutputOptions) -> Result<()> {
    let summary = summarize(store.tasks(), today());
    let orphaned: Vec<String> = orphaned_categories(store.tasks(), store.categories())
        .into_iter()
        .collect();
    let names: Vec<String> = store.categories().iter().map(|c| c.name.clone()).collect();

    let tasks = store.task_service();
    let by_status = Status::ALL
        .iter()
        .map(|&status| StatusCount {
            status,
            count: tasks.list_by_status(status).len(),
        })
        .collect();
    let by_category = names
        .into_iter()
        .chain(orphaned.iter().cloned())
        .map(|name| CategoryCount {
            count: tasks.list_by_category(&name).len(),
            name,
        })
        .collect();
    let report = StatsReport {
        summary,
        by_status,
        by_category,
        orphaned_categories: orphaned,
    };

    if out.json {
        return print_json(&report);
    }
    print_summary(&report.summary);
    println!();
    println!("By category:");
    for entry in &report.by_category {
        let marker = if report.orphaned_categories.contains(&entry.name) {
            " (no such category)"
        } else {
            ""
        };
        println!("  {:<16} {}{}", truncate(&entry.name, 16), entry.count, marker);
    }
    Ok(())
}

/// List categories, optionally recounting their tasks first.
pub fn cmd_categories(store: &mut EntityStore, out: OutputOptions, recount: bool) -> Result<()> {
    let mut service = store.category_service();
    let categories = if recount { service.recount() } else { service.list() };
    if out.json {
        return print_json(&categories);
    }
    if categories.is_empty() {
        println!("No categories.");
        return Ok(());
    }
    print_category_table(&categories);
    Ok(())
}

/// Category subcommands.
pub fn cmd_category(store: &mut EntityStore, out: OutputOptions, action: CategoryAction) -> Result<()> {
    let mut service = store.category_service();
    let (verb, category) = match action {
        CategoryAction::Show { id } => {
            let category = service.get(&id).ok_or(Error::CategoryNotFound(id))?;
            (None, category)
        }
        CategoryAction::Add { name, color } => {
            let mut patch = CategoryPatch::named(require_category_name(&name)?);
            if let Some(color) = color {
                patch = patch.with_color(color);
            }
            (Some("Created"), service.create(patch))
        }
        CategoryAction::Update { id, name, color } => {
            let patch = CategoryPatch {
                name: name.as_deref().map(require_category_name).transpose()?,
                color,
                ..Default::default()
            };
            (Some("Updated"), service.update(&id, patch)?)
        }
        CategoryAction::Delete { id } => (Some("Deleted"), service.delete(&id)?),
    };

    if out.json {
        return print_json(&category);
    }
    if let Some(verb) = verb {
        println!("{} category {}.", verb, category.id);
    }
    print_category_detail(&category);
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
