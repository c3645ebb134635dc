use serde_json::Value;

use crate::controller::TableListController;
use crate::domain::row::row_id;
use crate::dto::api::{ApiResponse, SearchPage};
use crate::dto::list::ListPageData;
use crate::pagination::Paginated;
use crate::repository::{RecordReader, RecordWriter};
use crate::services::ServiceResult;

/// Sorts fetched rows with the controller's comparator and collects their ids.
fn build_page(
    controller: &TableListController,
    total: usize,
    rows: &[Value],
    id_field: &str,
) -> ListPageData {
    let rows = controller.sort_rows(rows);
    let row_ids = rows.iter().filter_map(|row| row_id(row, id_field)).collect();
    let rows = Paginated::new(rows, controller.page_state(), total);

    if rows.is_out_of_range() {
        log::warn!(
            "Requested page {} but only {} pages exist",
            rows.page_index.saturating_add(1),
            rows.total_pages
        );
    }

    ListPageData { rows, row_ids }
}

/// Loads the page described by the controller's current state.
pub fn load_list_page<R>(
    repo: &R,
    controller: &TableListController,
    id_field: &str,
) -> ServiceResult<ListPageData>
where
    R: RecordReader + ?Sized,
{
    let query = controller.query();

    let (total, rows) = repo.search_records(&query).map_err(|err| {
        log::error!("Failed to load records: {err}");
        err
    })?;

    Ok(build_page(controller, total, &rows, id_field))
}

/// Builds the page from a search endpoint response envelope.
pub fn page_from_response(
    response: ApiResponse<SearchPage>,
    controller: &TableListController,
    id_field: &str,
) -> ServiceResult<ListPageData> {
    let search_page = response.into_result().map_err(|err| {
        log::error!("Search request failed: {err}");
        err
    })?;

    Ok(build_page(
        controller,
        search_page.total,
        &search_page.items,
        id_field,
    ))
}

/// Deletes the selected rows and clears the selection once the backend
/// confirms. Nothing selected is a no-op.
pub fn delete_selected<R>(repo: &R, controller: &mut TableListController) -> ServiceResult<usize>
where
    R: RecordWriter + ?Sized,
{
    if controller.selection().is_empty() {
        return Ok(0);
    }

    let ids = controller.selected_ids();
    let removed = repo.delete_records(&ids).map_err(|err| {
        log::error!("Failed to delete selected records: {err}");
        err
    })?;

    controller.clear_selection();
    log::info!("Deleted {removed} of {} selected records", ids.len());

    Ok(removed)
}


#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use serde_json::json;

    use super::*;
    use crate::domain::types::{PageSize, RowId, SortDirection};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    #[test]
    fn passes_controller_state_to_backend_and_resorts() {
        let mut repo = MockRepository::new();
        repo.expect_search_records()
            .withf(|query| {
                query.page == 2
                    && query.per_page == 25
                    && query.sort_field.as_str() == "amount"
                    && query.sort_order == SortDirection::Ascending
                    && query.search.as_deref() == Some("loan")
            })
            .times(1)
            .returning(|_| {
                Ok((
                    60,
                    vec![
                        json!({"_id": "2", "amount": 300}),
                        json!({"_id": "1", "amount": 100}),
                    ],
                ))
            });

        let mut ctrl =
            TableListController::new("date", SortDirection::Descending, PageSize::new(25).unwrap());
        ctrl.set_search("loan");
        ctrl.request_sort("amount");
        ctrl.change_page(2);

        let data = load_list_page(&repo, &ctrl, "_id").unwrap();

        assert_eq!(data.row_ids, vec![RowId::from("1"), RowId::from("2")]);
        assert_eq!(data.rows.total_pages, 3);
        assert!(!data.rows.has_next());
    }

    #[test]
    fn backend_failure_is_reported() {
        let mut repo = MockRepository::new();
        repo.expect_search_records()
            .times(1)
            .returning(|_| Err(RepositoryError::BackendError("timeout".to_string())));

        let ctrl = TableListController::with_order_by("date");
        let result = load_list_page(&repo, &ctrl, "_id");

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }

    #[test]
    fn failed_delete_keeps_selection() {
        let mut repo = MockRepository::new();
        repo.expect_delete_records()
            .withf(|ids| ids.len() == 2 && ids[0].as_str() == "a" && ids[1].as_str() == "b")
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let mut ctrl = TableListController::with_order_by("date");
        ctrl.select_all(["b", "a"], true);

        let result = delete_selected(&repo, &mut ctrl);

        assert!(result.is_err());
        assert_eq!(ctrl.selection().len(), 2);
    }
}
