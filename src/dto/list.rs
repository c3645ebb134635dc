//! Query parameters sent to search endpoints and the page payload handed back
//! to list screens.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::domain::types::{ColumnKey, RowId, SortDirection};
use crate::pagination::Paginated;

/// Parameters of a backend search call, serialized as
/// `page`, `perPage`, `sortField`, `sortOrder`, `search` and one entry per
/// field filter.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListQueryParams {
    /// Zero-based page index.
    pub page: usize,
    pub per_page: usize,
    pub sort_field: ColumnKey,
    pub sort_order: SortDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
}

impl ListQueryParams {
    /// Encodes the parameters as a URL query string.
    pub fn to_query_string(&self) -> Result<String, serde_html_form::ser::Error> {
        serde_html_form::to_string(self)
    }

    /// Offset of the first requested record.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.per_page)
    }
}

/// Data required to render a list screen.
#[derive(Debug, Clone, Serialize)]
pub struct ListPageData {
    /// Sorted rows of the current page.
    pub rows: Paginated<Value>,
    /// Ids of the rendered rows, in display order. Feed these to
    /// `select_all` when the header checkbox is clicked.
    pub row_ids: Vec<RowId>,
}
