//! Category records used to group tasks on the board.

use serde::{Deserialize, Serialize};

/// A named, coloured grouping. Tasks refer to a category by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Display metadata; only `CategoryService::recount` refreshes it.
    #[serde(default)]
    pub task_count: usize,
}

/// Caller-supplied fields for a category create or update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_count: Option<usize>,
}

impl CategoryPatch {
    /// Patch setting only the name.
    pub fn named(name: impl Into<String>) -> Self {
        CategoryPatch {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Overwrite the fields this patch sets. `id` is never applied.
    pub fn apply_to(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(color) = self.color {
            category.color = color;
        }
        if let Some(count) = self.task_count {
            category.task_count = count;
        }
    }
}
