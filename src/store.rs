//! The entity store: the one stateful component behind the services.
//!
//! `EntityStore` owns the task and category collections for the lifetime of
//! the process. It is seeded from a JSON document (the built-in sample board
//! or a file passed with `--seed`) and lends itself to `TaskService` and
//! `CategoryService` for reads and writes. Nothing is written back to disk.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::category_service::CategoryService;
use crate::config::Defaults;
use crate::error::Result;
use crate::fields::Status;
use crate::task::Task;
use crate::task_service::TaskService;

/// Sample board compiled into the binary.
const BUILTIN_SEED: &str = include_str!("../seed/seed.json");

/// Initial contents of a store.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Seed {
    /// Parse a seed document.
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Read and parse a seed file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// The sample board shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_SEED)
    }
}

/// In-memory collections of tasks and categories.
#[derive(Debug, Default)]
pub struct EntityStore {
    pub(crate) tasks: Vec<Task>,
    pub(crate) categories: Vec<Category>,
    pub(crate) defaults: Defaults,
}

impl EntityStore {
    /// Empty store using the given field defaults.
    pub fn new(defaults: Defaults) -> Self {
        EntityStore {
            tasks: Vec::new(),
            categories: Vec::new(),
            defaults,
        }
    }

    /// Store populated from a seed, with completion timestamps reconciled.
    pub fn from_seed(seed: Seed, defaults: Defaults) -> Self {
        let mut store = Self::new(defaults);
        store.tasks = seed.tasks;
        store.categories = seed.categories;
        store.reconcile_completion();
        tracing::debug!(
            tasks = store.tasks.len(),
            categories = store.categories.len(),
            "entity store seeded"
        );
        store
    }

    /// Seed from `path` when given, otherwise from the built-in sample board.
    pub fn open(seed_path: Option<&Path>, defaults: Defaults) -> Result<Self> {
        let seed = match seed_path {
            Some(path) => Seed::load(path)?,
            None => Seed::builtin()?,
        };
        Ok(Self::from_seed(seed, defaults))
    }

    /// Task operations over this store.
    pub fn task_service(&mut self) -> TaskService<'_> {
        TaskService::new(self)
    }

    /// Category operations over this store.
    pub fn category_service(&mut self) -> CategoryService<'_> {
        CategoryService::new(self)
    }

    /// Borrowed view of all tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Borrowed view of all categories in insertion order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category a new task should land in when the caller names none:
    /// the first catalog entry, else the configured default.
    pub fn preferred_category(&self) -> String {
        self.categories
            .first()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| self.defaults.category.clone())
    }

    pub(crate) fn task_index(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub(crate) fn category_index(&self, id: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.id == id)
    }

    /// Make seeded tasks satisfy "completed_at is set iff completed".
    fn reconcile_completion(&mut self) {
        for task in self.tasks.iter_mut() {
            match (task.status, task.completed_at) {
                (Status::Completed, None) => {
                    tracing::warn!(task_id = %task.id, "completed task without completedAt, using createdAt");
                    task.completed_at = Some(task.created_at);
                }
                (Status::Todo | Status::InProgress, Some(_)) => {
                    tracing::warn!(task_id = %task.id, "open task with completedAt, clearing it");
                    task.completed_at = None;
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_seed_parses_and_holds_invariant() {
        let store = EntityStore::open(None, Defaults::default()).expect("builtin seed");
        assert!(!store.tasks().is_empty());
        assert!(!store.categories().is_empty());
        for task in store.tasks() {
            assert_eq!(task.completed_at.is_some(), task.status == Status::Completed, "{}", task.id);
        }
    }

    #[test]
    fn test_seed_reconciles_completion() {
        let seed = Seed::from_json(
            r#"{"tasks":[
                {"id":"a","title":"Done without stamp","category":"Work","status":"completed",
                 "dueDate":"2024-01-02","createdAt":"2024-01-01T08:00:00Z"},
                {"id":"b","title":"Open with stamp","category":"Work","status":"todo",
                 "dueDate":"2024-01-02","createdAt":"2024-01-01T08:00:00Z",
                 "completedAt":"2024-01-01T09:00:00Z"}
            ]}"#,
        )
        .expect("seed");
        let store = EntityStore::from_seed(seed, Defaults::default());
        assert_eq!(store.tasks()[0].completed_at, Some(store.tasks()[0].created_at));
        assert_eq!(store.tasks()[1].completed_at, None);
        assert!(store.categories().is_empty());
    }

    #[test]
    fn test_preferred_category_falls_back_to_default() {
        let store = EntityStore::new(Defaults::default());
        assert_eq!(store.preferred_category(), "General");

        let seeded = EntityStore::open(None, Defaults::default()).expect("builtin seed");
        assert_eq!(seeded.preferred_category(), seeded.categories()[0].name);
    }

    #[test]
    fn test_open_reports_missing_seed_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = EntityStore::open(Some(&dir.path().join("nope.json")), Defaults::default())
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}
