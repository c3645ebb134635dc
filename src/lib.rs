//! List-state plumbing for the HR/payroll back office.
//!
//! Every list screen (attendance, leave, loans, deductions, incentives,
//! overtime, bookings) owns a [`TableListController`] holding its page, sort
//! and selection state. [`services::list`] turns that state into backend
//! queries and sorted, paginated pages ready for rendering.

pub mod controller;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;
pub mod sorting;

pub use controller::TableListController;
pub use sorting::{comparator, stable_sort};
