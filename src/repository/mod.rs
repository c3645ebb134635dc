//! Record sources backing list screens.
//!
//! The production source is the remote search endpoint; [`memory`] keeps
//! records in process and answers the same queries.

use serde_json::Value;

use crate::domain::types::RowId;
use crate::dto::list::ListQueryParams;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use memory::InMemoryRepository;

pub trait RecordReader {
    /// Returns the total number of matching records and the requested page.
    fn search_records(&self, query: &ListQueryParams) -> RepositoryResult<(usize, Vec<Value>)>;
}

pub trait RecordWriter {
    /// Deletes the given records and returns how many were removed.
    fn delete_records(&self, ids: &[RowId]) -> RepositoryResult<usize>;
}
