//! Task CRUD and derived queries over the entity store.
//!
//! Every record handed out is a clone; changing one never touches the store.
//! Writes keep two rules: a task's `id` never changes after creation, and
//! `completed_at` is set exactly when the status is `Completed`.

use chrono::{Local, Utc};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::fields::Status;
use crate::store::EntityStore;
use crate::task::{Task, TaskPatch};

/// Task CRUD and queries over a borrowed store.
pub struct TaskService<'a> {
    store: &'a mut EntityStore,
}

impl<'a> TaskService<'a> {
    /// Borrow `store` for task operations.
    pub fn new(store: &'a mut EntityStore) -> Self {
        TaskService { store }
    }

    /// Snapshot of all tasks in insertion order.
    pub fn list(&self) -> Vec<Task> {
        self.store.tasks.clone()
    }

    /// Look up a task. Absence is a normal outcome.
    pub fn get(&self, id: &str) -> Option<Task> {
        self.store.tasks.iter().find(|t| t.id == id).cloned()
    }

    /// Create a task from `patch`, filling every unset field with its default.
    ///
    /// A caller-supplied `id` is ignored; the task always receives a fresh one.
    pub fn create(&mut self, patch: TaskPatch) -> Task {
        let now = Utc::now();
        let mut task = Task {
            id: self.fresh_id(),
            title: String::new(),
            description: String::new(),
            category: self.store.defaults.category.clone(),
            priority: Default::default(),
            status: Status::Todo,
            due_date: Local::now().date_naive(),
            created_at: now,
            completed_at: None,
            archived: false,
        };
        patch.apply_to(&mut task);
        task.sync_completion(now);

        tracing::debug!(task_id = %task.id, status = task.status.as_str(), "task created");
        self.store.tasks.push(task.clone());
        task
    }

    /// Merge `patch` over the stored task and return the result.
    ///
    /// The stored `id` always wins over one in the patch. Fails with
    /// `TaskNotFound` and leaves the store untouched when `id` is unknown.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        let index = self
            .store
            .task_index(id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;

        let mut task = self.store.tasks[index].clone();
        patch.apply_to(&mut task);
        task.sync_completion(Utc::now());

        tracing::debug!(task_id = %task.id, status = task.status.as_str(), "task updated");
        self.store.tasks[index] = task.clone();
        Ok(task)
    }

    /// Remove a task and hand it back.
    pub fn delete(&mut self, id: &str) -> Result<Task> {
        let index = self
            .store
            .task_index(id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        let task = self.store.tasks.remove(index);
        tracing::debug!(task_id = %task.id, "task deleted");
        Ok(task)
    }

    /// Tasks whose category name equals `name`, archived ones included.
    pub fn list_by_category(&self, name: &str) -> Vec<Task> {
        self.store
            .tasks
            .iter()
            .filter(|t| t.category == name)
            .cloned()
            .collect()
    }

    /// Tasks in `status`, archived ones included.
    pub fn list_by_status(&self, status: Status) -> Vec<Task> {
        self.store
            .tasks
            .iter()
            .filter(|t| t.status == status)
            .cloned()
            .collect()
    }

    /// Hide a task from default views without deleting it.
    pub fn archive(&mut self, id: &str) -> Result<Task> {
        self.set_archived(id, true)
    }

    /// Bring an archived task back.
    pub fn unarchive(&mut self, id: &str) -> Result<Task> {
        self.set_archived(id, false)
    }

    /// Move a task to another board column. Any transition is allowed.
    pub fn set_status(&mut self, id: &str, status: Status) -> Result<Task> {
        self.update(id, TaskPatch::default().with_status(status))
    }

    fn set_archived(&mut self, id: &str, archived: bool) -> Result<Task> {
        self.update(
            id,
            TaskPatch {
                archived: Some(archived),
                ..Default::default()
            },
        )
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.store.task_index(&id).is_none() {
                return id;
            }
        }
    }
}
