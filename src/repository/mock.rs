//! Mock repository implementations for isolating services in tests.

use mockall::mock;
use serde_json::Value;

use crate::domain::types::RowId;
use crate::dto::list::ListQueryParams;
use crate::repository::errors::RepositoryResult;
use crate::repository::{RecordReader, RecordWriter};

mock! {
    pub Repository {}

    impl RecordReader for Repository {
        fn search_records(&self, query: &ListQueryParams) -> RepositoryResult<(usize, Vec<Value>)>;
    }

    impl RecordWriter for Repository {
        fn delete_records(&self, ids: &[RowId]) -> RepositoryResult<usize>;
    }
}
