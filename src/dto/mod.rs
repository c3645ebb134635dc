//! Data transfer objects exchanged with list screens and search backends.

pub mod api;
pub mod list;
