//! State records held by a list view: page position, sort request, row
//! selection and active filters.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::domain::types::{ColumnKey, PageSize, RowId, SortDirection};

/// Current pagination position.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct PageState {
    /// Zero-based index of the displayed page.
    pub page_index: usize,
    pub page_size: PageSize,
}

impl PageState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }
}

/// The single active ordering request.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SortState {
    pub order_by: ColumnKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(order_by: impl Into<ColumnKey>, direction: SortDirection) -> Self {
        Self {
            order_by: order_by.into(),
            direction,
        }
    }
}

/// Rows ticked on the currently rendered page.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct SelectionState {
    selected_ids: HashSet<RowId>,
}

impl SelectionState {
    /// Adds the id when absent, removes it when present.
    pub fn toggle(&mut self, row_id: RowId) {
        if !self.selected_ids.remove(row_id.as_str()) {
            self.selected_ids.insert(row_id);
        }
    }

    /// Replaces the whole selection with the given ids.
    pub fn replace_with<I>(&mut self, row_ids: I)
    where
        I: IntoIterator<Item = RowId>,
    {
        self.selected_ids = row_ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.selected_ids.clear();
    }

    pub fn contains(&self, row_id: &str) -> bool {
        self.selected_ids.contains(row_id)
    }

    pub fn len(&self) -> usize {
        self.selected_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    pub fn ids(&self) -> &HashSet<RowId> {
        &self.selected_ids
    }
}

/// Search text and per-field equality filters applied by the backend.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct FilterState {
    /// Trimmed free-text search; `None` when blank.
    pub search: Option<String>,
    /// Field path to expected value.
    pub fields: BTreeMap<String, String>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.fields.is_empty()
    }
}
