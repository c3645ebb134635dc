//! Client-side ordering of fetched rows.
//!
//! Rows are dynamic JSON objects. A column key is resolved as a dotted path
//! into each row and the resolved values are mapped onto [`SortKey`], which
//! carries a total order so that sorting never panics on odd data.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::domain::row::resolve_path;
use crate::domain::types::{ColumnKey, SortDirection};

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Comparable projection of a resolved cell value.
///
/// Variants are ordered by kind first; missing values sort before everything
/// else. Arrays and objects compare by their JSON text.
#[derive(Debug, Clone)]
pub enum SortKey<'a> {
    Missing,
    Bool(bool),
    Number(f64),
    Date(DateTime<Utc>),
    Text(&'a str),
    Other(String),
}

impl<'a> SortKey<'a> {
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::Bool(b)) => Self::Bool(*b),
            Some(Value::Number(n)) => n.as_f64().map_or(Self::Missing, Self::Number),
            Some(Value::String(s)) => parse_instant(s).map_or(Self::Text(s), Self::Date),
            Some(other) => Self::Other(other.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::Date(_) => 3,
            Self::Text(_) => 4,
            Self::Other(_) => 5,
        }
    }
}

impl PartialEq for SortKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey<'_> {}

impl PartialOrd for SortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Missing, Self::Missing) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Other(a), Self::Other(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Parses RFC 3339 timestamps, ISO date-times without offset (taken as UTC)
/// and plain `YYYY-MM-DD` dates.
fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    // cheap reject for ordinary text
    if s.len() < 10 || !s.as_bytes()[0].is_ascii_digit() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Natural ascending comparison of two rows on `order_by`.
pub fn compare_rows(a: &Value, b: &Value, order_by: &str) -> Ordering {
    let left = SortKey::from_value(resolve_path(a, order_by));
    let right = SortKey::from_value(resolve_path(b, order_by));
    left.cmp(&right)
}

/// Builds a row comparator for the given direction and column key.
pub fn comparator(
    direction: SortDirection,
    order_by: &ColumnKey,
) -> impl Fn(&Value, &Value) -> Ordering + use<> {
    let order_by = order_by.clone();
    move |a, b| {
        let natural = compare_rows(a, b, order_by.as_str());
        match direction {
            SortDirection::Ascending => natural,
            SortDirection::Descending => natural.reverse(),
        }
    }
}

/// Returns a sorted copy of `rows`; rows the comparator considers equal keep
/// their input order.
pub fn stable_sort<T, F>(rows: &[T], compare: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let mut decorated: Vec<(usize, &T)> = rows.iter().enumerate().collect();
    decorated.sort_by(|(ia, a), (ib, b)| compare(a, b).then_with(|| ia.cmp(ib)));
    decorated.into_iter().map(|(_, row)| row.clone()).collect()
}
