//! Value objects and state records owned by list views.

pub mod duration;
pub mod row;
pub mod table;
pub mod types;
