//! Minute arithmetic for attendance and overtime columns.

use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Whole minutes worked, never negative.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct WorkedMinutes(u32);

impl WorkedMinutes {
    pub const fn new(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Minutes between check-in and check-out. A check-out earlier than the
    /// check-in yields zero.
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let minutes = (end - start).num_minutes().clamp(0, i64::from(u32::MAX));
        Self(u32::try_from(minutes).unwrap_or(u32::MAX))
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn hours(self) -> u32 {
        self.0 / 60
    }

    pub const fn remainder_minutes(self) -> u32 {
        self.0 % 60
    }

    /// Hours as a decimal rounded to two places, as used on payroll exports.
    pub fn hours_decimal(self) -> f64 {
        (f64::from(self.0) / 60.0 * 100.0).round() / 100.0
    }

    /// Minutes past the given threshold, e.g. the overtime share of a shift.
    #[must_use]
    pub const fn excess_over(self, threshold: Self) -> Self {
        Self(self.0.saturating_sub(threshold.0))
    }
}

impl Display for WorkedMinutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h {:02}m", self.hours(), self.remainder_minutes())
    }
}

impl From<u32> for WorkedMinutes {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
