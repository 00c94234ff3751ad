//! In-memory selection state for facet pickers.
//!
//! Each page owns one `SelectionState`: assignees and labels are
//! multi-select, the milestone is single-select. State is created fresh on
//! page mount and dropped on navigation; nothing here persists.

use serde::{Deserialize, Serialize};

/// Insertion-ordered multi-select id set.
///
/// Order has no filtering meaning but is preserved so the rendered chips are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiSelect {
    ids: Vec<i64>,
}

impl MultiSelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: Vec<i64>) -> Self {
        let mut select = Self::new();
        for id in ids {
            if !select.contains(id) {
                select.ids.push(id);
            }
        }
        select
    }

    /// Add the id if absent, remove it if present.
    pub fn toggle(&mut self, id: i64) {
        if let Some(pos) = self.ids.iter().position(|&x| x == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn replace(&mut self, ids: Vec<i64>) {
        *self = Self::from_ids(ids);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Single-select slot. Toggling the selected id again clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleSelect {
    id: Option<i64>,
}

impl SingleSelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_id(id: Option<i64>) -> Self {
        Self { id }
    }

    /// Clear when `id` is already selected, otherwise replace the selection.
    pub fn toggle(&mut self, id: i64) {
        if self.id == Some(id) {
            self.id = None;
        } else {
            self.id = Some(id);
        }
    }

    pub fn selected(&self) -> Option<i64> {
        self.id
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.id == Some(id)
    }

    pub fn clear(&mut self) {
        self.id = None;
    }

    pub fn replace(&mut self, id: Option<i64>) {
        self.id = id;
    }
}

/// Selection state for one page: the three editable facets of an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub assignees: MultiSelect,
    pub labels: MultiSelect,
    pub milestone: SingleSelect,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }
}
