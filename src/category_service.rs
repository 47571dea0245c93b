//! Category CRUD over the entity store.
//!
//! Mirrors the task service: clones out, patch-merge updates, stable ids.
//! Removing or renaming a category never touches the tasks that name it.

use uuid::Uuid;

use crate::category::{Category, CategoryPatch};
use crate::error::{Error, Result};
use crate::store::EntityStore;
use crate::task::Task;

/// Category CRUD over a borrowed store.
pub struct CategoryService<'a> {
    store: &'a mut EntityStore,
}

impl<'a> CategoryService<'a> {
    /// Borrow `store` for category operations.
    pub fn new(store: &'a mut EntityStore) -> Self {
        CategoryService { store }
    }

    /// Snapshot of all categories in insertion order.
    pub fn list(&self) -> Vec<Category> {
        self.store.categories.clone()
    }

    /// Look up a category by id.
    pub fn get(&self, id: &str) -> Option<Category> {
        self.store.categories.iter().find(|c| c.id == id).cloned()
    }

    /// Create a category; unset fields take their defaults (empty name,
    /// configured colour, zero tasks).
    pub fn create(&mut self, patch: CategoryPatch) -> Category {
        let mut category = Category {
            id: self.fresh_id(),
            name: String::new(),
            color: self.store.defaults.category_color.clone(),
            task_count: 0,
        };
        patch.apply_to(&mut category);

        tracing::debug!(category_id = %category.id, name = %category.name, "category created");
        self.store.categories.push(category.clone());
        category
    }

    /// Merge `patch` over the stored category, keeping its id.
    ///
    /// Fails with `CategoryNotFound` and changes nothing when `id` is unknown.
    pub fn update(&mut self, id: &str, patch: CategoryPatch) -> Result<Category> {
        let index = self
            .store
            .category_index(id)
            .ok_or_else(|| Error::CategoryNotFound(id.to_string()))?;

        let mut category = self.store.categories[index].clone();
        patch.apply_to(&mut category);

        tracing::debug!(category_id = %category.id, "category updated");
        self.store.categories[index] = category.clone();
        Ok(category)
    }

    /// Remove a category and hand it back. Tasks naming it are left alone.
    pub fn delete(&mut self, id: &str) -> Result<Category> {
        let index = self
            .store
            .category_index(id)
            .ok_or_else(|| Error::CategoryNotFound(id.to_string()))?;
        let category = self.store.categories.remove(index);
        tracing::debug!(category_id = %category.id, "category deleted");
        Ok(category)
    }

    /// Recompute every `task_count` from the current tasks.
    ///
    /// Counts non-archived tasks whose category equals the category's name.
    /// Writes never call this; counts stay as seeded until asked.
    pub fn recount(&mut self) -> Vec<Category> {
        let EntityStore {
            tasks, categories, ..
        } = &mut *self.store;
        for category in categories.iter_mut() {
            category.task_count = count_for(tasks, &category.name);
        }
        tracing::debug!(categories = categories.len(), "category task counts recomputed");
        categories.clone()
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.store.category_index(&id).is_none() {
                return id;
            }
        }
    }
}

fn count_for(tasks: &[Task], name: &str) -> usize {
    tasks
        .iter()
        .filter(|t| !t.archived && t.category == name)
        .count()
}
