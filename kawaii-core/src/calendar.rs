//! Month grid computation.
//!
//! A grid is the list of cells a front end draws for one month: blank cells
//! for the weekdays before the 1st (weeks start on Sunday) followed by one
//! cell per day carrying its overlays.

use chrono::{Datelike, Months, NaiveDate};

use crate::day::DayKey;
use crate::day_event::DayEvents;
use crate::period::{BarSegment, PeriodEvent};

pub const DAYS_PER_WEEK: usize = 7;

/// The month currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMonth {
    first: NaiveDate,
}

impl DisplayMonth {
    /// `month` is 1-based. Returns `None` for an impossible month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| DisplayMonth { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        DisplayMonth {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            None => 31,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn prev(&self) -> Self {
        DisplayMonth {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn next(&self) -> Self {
        DisplayMonth {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    /// e.g. "October 2026"
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// Number of blank cells before the 1st.
    pub fn leading_blanks(&self) -> usize {
        self.first.weekday().num_days_from_sunday() as usize
    }
}

/// One period event crossing a day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodBar {
    pub period_id: i64,
    pub title: String,
    pub segment: BarSegment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub stamp: Option<String>,
    pub has_comment: bool,
    pub has_image: bool,
    pub bars: Vec<PeriodBar>,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(DayCell),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: DisplayMonth,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn build(
        month: DisplayMonth,
        today: NaiveDate,
        events: &DayEvents,
        periods: &[PeriodEvent],
    ) -> Self {
        let mut cells: Vec<GridCell> = (0..month.leading_blanks()).map(|_| GridCell::Blank).collect();

        let days = month
            .first_day()
            .iter_days()
            .take(month.days_in_month() as usize)
            .map(|date| GridCell::Day(build_cell(date, today, events, periods)));
        cells.extend(days);

        MonthGrid { month, cells }
    }

    /// Rows of up to seven cells; the last row is not padded.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|cell| match cell {
            GridCell::Day(day) => Some(day),
            GridCell::Blank => None,
        })
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.days().find(|cell| cell.day() == day)
    }
}

fn build_cell(
    date: NaiveDate,
    today: NaiveDate,
    events: &DayEvents,
    periods: &[PeriodEvent],
) -> DayCell {
    let event = events.get(&DayKey::new(date));

    let bars = periods
        .iter()
        .filter_map(|period| {
            period.segment_on(date).map(|segment| PeriodBar {
                period_id: period.id,
                title: period.title.clone(),
                segment,
            })
        })
        .collect();

    DayCell {
        date,
        is_today: date == today,
        stamp: event.and_then(|e| e.stamp.clone()),
        has_comment: event.is_some_and(|e| e.has_comment()),
        has_image: event.is_some_and(|e| e.image.is_some()),
        bars,
    }
}
