//! In-process record source answering list queries over JSON rows.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use crate::domain::row::{cell_text, resolve_path, row_id};
use crate::domain::types::RowId;
use crate::dto::list::ListQueryParams;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{RecordReader, RecordWriter};
use crate::sorting::{comparator, stable_sort};

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    rows: RefCell<Vec<Value>>,
    id_field: String,
}

impl InMemoryRepository {
    pub fn new(rows: Vec<Value>, id_field: impl Into<String>) -> Self {
        Self {
            rows: RefCell::new(rows),
            id_field: id_field.into(),
        }
    }

    /// Parses a JSON array of objects.
    pub fn from_json(json: &str, id_field: impl Into<String>) -> RepositoryResult<Self> {
        let rows: Vec<Value> = serde_json::from_str(json)?;
        Self::from_rows(rows, id_field)
    }

    /// Accepts rows that are all JSON objects.
    pub fn from_rows(rows: Vec<Value>, id_field: impl Into<String>) -> RepositoryResult<Self> {
        if let Some(position) = rows.iter().position(|row| !row.is_object()) {
            return Err(RepositoryError::ValidationError(format!(
                "record #{position} is not an object"
            )));
        }
        Ok(Self::new(rows, id_field))
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }

    /// Copy of every stored row in insertion order.
    pub fn snapshot(&self) -> Vec<Value> {
        self.rows.borrow().clone()
    }
}

/// Case-insensitive substring match against every string leaf of the row.
fn contains_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Array(items) => items.iter().any(|item| contains_text(item, needle)),
        Value::Object(map) => map.values().any(|item| contains_text(item, needle)),
        _ => false,
    }
}

fn matches_filters(row: &Value, filters: &BTreeMap<String, String>) -> bool {
    filters.iter().all(|(field, expected)| {
        resolve_path(row, field)
            .and_then(cell_text)
            .is_some_and(|actual| actual == *expected)
    })
}

impl RecordReader for InMemoryRepository {
    fn search_records(&self, query: &ListQueryParams) -> RepositoryResult<(usize, Vec<Value>)> {
        let rows = self.rows.borrow();
        let needle = query.search.as_deref().map(str::to_lowercase);

        let matching: Vec<&Value> = rows
            .iter()
            .filter(|row| needle.as_deref().is_none_or(|n| contains_text(row, n)))
            .filter(|row| matches_filters(row, &query.filters))
            .collect();

        let compare = comparator(query.sort_order, &query.sort_field);
        let sorted = stable_sort(&matching, |a, b| compare(a, b));

        let total = sorted.len();
        let page = sorted
            .into_iter()
            .skip(query.offset())
            .take(query.per_page)
            .cloned()
            .collect();

        Ok((total, page))
    }
}

impl RecordWriter for InMemoryRepository {
    fn delete_records(&self, ids: &[RowId]) -> RepositoryResult<usize> {
        let doomed: HashSet<&str> = ids.iter().map(RowId::as_str).collect();
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|row| {
            row_id(row, &self.id_field).is_none_or(|id| !doomed.contains(id.as_str()))
        });
        Ok(before - rows.len())
    }
}
