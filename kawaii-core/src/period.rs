//! Multi-day events drawn as bars across the month grid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An event spanning the inclusive range `start..=end`.
///
/// `end >= start` is checked when the event is created and not afterwards;
/// an inverted range loaded from storage simply covers no days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodEvent {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(with = "crate::day::iso")]
    pub start: NaiveDate,
    #[serde(with = "crate::day::iso")]
    pub end: NaiveDate,
}

/// Where a covered day sits within its bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarSegment {
    pub is_start: bool,
    pub is_end: bool,
}

impl BarSegment {
    pub fn is_middle(&self) -> bool {
        !self.is_start && !self.is_end
    }
}

impl PeriodEvent {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Bar segment for `date`, or `None` when the day is outside the range.
    pub fn segment_on(&self, date: NaiveDate) -> Option<BarSegment> {
        self.covers(date).then(|| BarSegment {
            is_start: date == self.start,
            is_end: date == self.end,
        })
    }

    /// Number of covered days (0 for an inverted range).
    pub fn len_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }
}
