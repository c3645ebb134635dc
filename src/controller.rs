//! Page, sort and selection state behind a single list screen.
//!
//! One [`TableListController`] is created per list view and dropped with it.
//! Handlers mutate the state in place; the caller observes the new state and
//! decides whether to refetch.

use std::cmp::Ordering;

use serde_json::Value;

use crate::domain::table::{FilterState, PageState, SelectionState, SortState};
use crate::domain::types::{ColumnKey, PageSize, RowId, SortDirection, TypeConstraintError};
use crate::dto::list::ListQueryParams;
use crate::models::config::ListConfig;
use crate::sorting;

#[derive(Clone, Debug, PartialEq)]
pub struct TableListController {
    page: PageState,
    sort: SortState,
    selection: SelectionState,
    filters: FilterState,
}

impl TableListController {
    /// Creates a controller on the first page with an empty selection.
    pub fn new(
        default_order_by: impl Into<ColumnKey>,
        default_order: SortDirection,
        default_page_size: PageSize,
    ) -> Self {
        Self {
            page: PageState::new(default_page_size),
            sort: SortState::new(default_order_by, default_order),
            selection: SelectionState::default(),
            filters: FilterState::default(),
        }
    }

    /// Creates a controller with descending order and the default page size.
    pub fn with_order_by(default_order_by: impl Into<ColumnKey>) -> Self {
        Self::new(
            default_order_by,
            SortDirection::default(),
            PageSize::default(),
        )
    }

    pub fn from_config(config: &ListConfig) -> Result<Self, TypeConstraintError> {
        Ok(Self::new(
            config.default_order_by.as_str(),
            config.default_order,
            config.page_size()?,
        ))
    }

    pub fn page_index(&self) -> usize {
        self.page.page_index
    }

    pub fn page_size(&self) -> PageSize {
        self.page.page_size
    }

    pub fn order(&self) -> SortDirection {
        self.sort.direction
    }

    pub fn order_by(&self) -> &ColumnKey {
        &self.sort.order_by
    }

    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Header click: toggles direction on the active column, otherwise
    /// switches to `column_key` ascending. The page index is kept.
    pub fn request_sort(&mut self, column_key: impl Into<ColumnKey>) {
        let column_key = column_key.into();
        if column_key == self.sort.order_by {
            self.sort.direction = self.sort.direction.toggled();
        } else {
            self.sort.order_by = column_key;
            self.sort.direction = SortDirection::Ascending;
        }
        log::debug!(
            "Sort changed to {} {}",
            self.sort.order_by,
            self.sort.direction
        );
    }

    /// Moves to `new_page_index`. Bounds are the caller's concern.
    pub fn change_page(&mut self, new_page_index: usize) {
        self.page.page_index = new_page_index;
    }

    /// Sets the page size and returns to the first page.
    pub fn change_page_size(&mut self, new_page_size: PageSize) {
        self.page.page_size = new_page_size;
        self.page.page_index = 0;
    }

    /// Checkbox click on a single row.
    pub fn select_row(&mut self, row_id: impl Into<RowId>) {
        self.selection.toggle(row_id.into());
    }

    /// Header checkbox. `row_ids_on_page` must be the ids rendered right now;
    /// a checked box replaces the selection with exactly those ids.
    pub fn select_all<I>(&mut self, row_ids_on_page: I, checked: bool)
    where
        I: IntoIterator,
        I::Item: Into<RowId>,
    {
        if checked {
            self.selection
                .replace_with(row_ids_on_page.into_iter().map(Into::into));
        } else {
            self.selection.clear();
        }
    }

    pub fn is_selected(&self, row_id: &str) -> bool {
        self.selection.contains(row_id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected ids in a deterministic order.
    pub fn selected_ids(&self) -> Vec<RowId> {
        let mut ids: Vec<RowId> = self.selection.ids().iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Updates the search text. Blank input clears it. Returns to the first
    /// page when the effective search changes.
    pub fn set_search(&mut self, text: impl AsRef<str>) {
        let search = Some(text.as_ref().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        if search != self.filters.search {
            self.filters.search = search;
            self.page.page_index = 0;
        }
    }

    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let previous = self.filters.fields.insert(field.into(), value.clone());
        if previous.as_deref() != Some(value.as_str()) {
            self.page.page_index = 0;
        }
    }

    pub fn remove_filter(&mut self, field: &str) {
        if self.filters.fields.remove(field).is_some() {
            self.page.page_index = 0;
        }
    }

    /// Drops search text and every field filter.
    pub fn clear_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters = FilterState::default();
            self.page.page_index = 0;
        }
    }

    /// Comparator for the current sort state.
    pub fn comparator(&self) -> impl Fn(&Value, &Value) -> Ordering + use<> {
        sorting::comparator(self.sort.direction, &self.sort.order_by)
    }

    /// Sorted copy of `rows` under the current sort state.
    pub fn sort_rows(&self, rows: &[Value]) -> Vec<Value> {
        sorting::stable_sort(rows, self.comparator())
    }

    /// Backend query parameters for the current state.
    pub fn query(&self) -> ListQueryParams {
        ListQueryParams {
            page: self.page.page_index,
            per_page: self.page.page_size.get(),
            sort_field: self.sort.order_by.clone(),
            sort_order: self.sort.direction,
            search: self.filters.search.clone(),
            filters: self.filters.fields.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;

    fn controller() -> TableListController {
        TableListController::with_order_by("createdAt")
    }

    fn selected(ctrl: &TableListController) -> HashSet<String> {
        ctrl.selection()
            .ids()
            .iter()
            .map(|id| id.as_str().to_string())
            .collect()
    }

    #[test]
    fn starts_on_first_page_with_defaults() {
        let ctrl = TableListController::new(
            "date",
            SortDirection::Ascending,
            PageSize::new(25).unwrap(),
        );
        assert_eq!(ctrl.page_index(), 0);
        assert_eq!(ctrl.page_size().get(), 25);
        assert_eq!(ctrl.order_by().as_str(), "date");
        assert_eq!(ctrl.order(), SortDirection::Ascending);
        assert!(ctrl.selection().is_empty());

        let ctrl = controller();
        assert_eq!(ctrl.order(), SortDirection::Descending);
        assert_eq!(ctrl.page_size().get(), 10);
    }

    #[test]
    fn repeated_sort_on_same_column_toggles() {
        let mut ctrl = controller();
        ctrl.request_sort("amount");
        assert_eq!(ctrl.order(), SortDirection::Ascending);
        ctrl.request_sort("amount");
        assert_eq!(ctrl.order(), SortDirection::Descending);
        ctrl.request_sort("amount");
        assert_eq!(ctrl.order(), SortDirection::Ascending);
        assert_eq!(ctrl.order_by().as_str(), "amount");
    }

    #[test]
    fn switching_column_resets_to_ascending() {
        let mut ctrl = TableListController::new("a", SortDirection::Descending, PageSize::default());
        ctrl.request_sort("b");
        assert_eq!(ctrl.order_by().as_str(), "b");
        assert_eq!(ctrl.order(), SortDirection::Ascending);
    }

    #[test]
    fn sorting_keeps_page_index() {
        let mut ctrl = controller();
        ctrl.change_page(4);
        ctrl.request_sort("name");
        assert_eq!(ctrl.page_index(), 4);
    }

    #[test]
    fn change_page_is_unchecked() {
        let mut ctrl = controller();
        ctrl.change_page(9_999);
        assert_eq!(ctrl.page_index(), 9_999);
    }

    #[test]
    fn page_size_change_returns_to_first_page() {
        let mut ctrl = controller();
        ctrl.change_page(3);
        ctrl.change_page_size(PageSize::new(10).unwrap());
        assert_eq!(ctrl.page_index(), 0);
        ctrl.change_page(2);
        ctrl.change_page_size(PageSize::new(50).unwrap());
        assert_eq!(ctrl.page_index(), 0);
        assert_eq!(ctrl.page_size().get(), 50);
    }

    #[test]
    fn selecting_a_row_twice_restores_selection() {
        let mut ctrl = controller();
        ctrl.select_row("1");
        ctrl.select_row("2");
        let before = selected(&ctrl);

        ctrl.select_row("x");
        assert!(ctrl.is_selected("x"));
        ctrl.select_row("x");

        assert_eq!(selected(&ctrl), before);
    }

    #[test]
    fn select_all_replaces_previous_selection() {
        let mut ctrl = controller();
        ctrl.select_row("1");
        ctrl.select_all(["2", "3"], true);

        let expected: HashSet<String> = ["2", "3"].into_iter().map(String::from).collect();
        assert_eq!(selected(&ctrl), expected);
        assert!(!ctrl.is_selected("1"));
    }

    #[test]
    fn unchecking_select_all_clears() {
        let mut ctrl = controller();
        ctrl.select_all(vec!["a".to_string(), "b".to_string()], true);
        ctrl.select_all(Vec::<String>::new(), false);
        assert!(ctrl.selection().is_empty());

        ctrl.select_row("c");
        ctrl.clear_selection();
        assert!(ctrl.selected_ids().is_empty());
    }

    #[test]
    fn selected_ids_are_sorted() {
        let mut ctrl = controller();
        ctrl.select_all(["c", "a", "b"], true);
        let ids: Vec<String> = ctrl.selected_ids().into_iter().map(String::from).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn search_change_returns_to_first_page() {
        let mut ctrl = controller();
        ctrl.change_page(3);
        ctrl.set_search("  alice ");
        assert_eq!(ctrl.page_index(), 0);
        assert_eq!(ctrl.filters().search.as_deref(), Some("alice"));

        ctrl.change_page(2);
        ctrl.set_search("alice");
        assert_eq!(ctrl.page_index(), 2);

        ctrl.set_search("   ");
        assert_eq!(ctrl.page_index(), 0);
        assert!(ctrl.filters().search.is_none());
    }

    #[test]
    fn filter_changes_return_to_first_page() {
        let mut ctrl = controller();
        ctrl.change_page(5);
        ctrl.set_filter("status", "approved");
        assert_eq!(ctrl.page_index(), 0);

        ctrl.change_page(1);
        ctrl.set_filter("status", "approved");
        assert_eq!(ctrl.page_index(), 1);

        ctrl.remove_filter("missing");
        assert_eq!(ctrl.page_index(), 1);
        ctrl.remove_filter("status");
        assert_eq!(ctrl.page_index(), 0);

        ctrl.set_filter("type", "sick");
        ctrl.change_page(2);
        ctrl.clear_filters();
        assert_eq!(ctrl.page_index(), 0);
        assert!(ctrl.filters().is_empty());
    }

    #[test]
    fn query_mirrors_state() {
        let mut ctrl = controller();
        ctrl.request_sort("employeeId.name");
        ctrl.change_page(2);
        ctrl.set_filter("status", "pending");
        ctrl.change_page(1);

        let query = ctrl.query();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 10);
        assert_eq!(query.sort_field.as_str(), "employeeId.name");
        assert_eq!(query.sort_order, SortDirection::Ascending);
        assert_eq!(query.filters.get("status").map(String::as_str), Some("pending"));
    }

    #[test]
    fn sort_rows_uses_current_state() {
        let mut ctrl = controller();
        ctrl.request_sort("v");
        let rows = vec![json!({"v": 2}), json!({"v": 1})];
        assert_eq!(ctrl.sort_rows(&rows), vec![json!({"v": 1}), json!({"v": 2})]);
        ctrl.request_sort("v");
        assert_eq!(ctrl.sort_rows(&rows), rows);
    }

    #[test]
    fn builds_from_config() {
        let config = ListConfig {
            default_order_by: "date".to_string(),
            default_order: SortDirection::Ascending,
            default_page_size: 25,
            page_size_options: vec![10, 25],
            id_field: "_id".to_string(),
        };
        let ctrl = TableListController::from_config(&config).unwrap();
        assert_eq!(ctrl.page_size().get(), 25);
        assert_eq!(ctrl.order(), SortDirection::Ascending);

        let broken = ListConfig {
            default_page_size: 0,
            ..config
        };
        assert_eq!(
            TableListController::from_config(&broken),
            Err(TypeConstraintError::NonPositivePageSize)
        );
    }
}
