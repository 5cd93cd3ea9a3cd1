//! Date range and week window primitives.
//!
//! Every generator operates on an inclusive [`DateRange`] and walks it in
//! consecutive 7-day [`WeekWindow`]s anchored at the range start, not at
//! calendar weeks. The final window is clipped when the range length is not
//! a multiple of seven.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Weekday};

use crate::generators::ScheduleError;

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Creates a range, rejecting `end < start`.
    pub fn new(start: Date, end: Date) -> Result<Self, ScheduleError> {
        if end < start {
            return Err(ScheduleError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day of the range.
    pub fn start(&self) -> Date {
        self.start
    }

    /// Last day of the range, inclusive.
    pub fn end(&self) -> Date {
        self.end
    }

    /// Number of days in the range, counting both endpoints.
    ///
    /// A single-day range has one day, never zero.
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }

    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Day at `offset` days past the range start.
    pub fn day_at(&self, offset: i64) -> Date {
        self.start + Duration::days(offset)
    }

    /// Iterates the range as consecutive week windows, in order.
    pub fn weeks(&self) -> Weeks {
        Weeks {
            next_start: Some(self.start),
            end: self.end,
        }
    }
}

/// One 7-day (or clipped) slice of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: Date,
    pub end: Date,
}

impl WeekWindow {
    /// Days of the window in chronological order.
    pub fn days(self) -> impl Iterator<Item = Date> {
        let len = (self.end - self.start).whole_days() + 1;
        (0..len).map(move |offset| self.start + Duration::days(offset))
    }
}

/// Iterator over a range's week windows.
#[derive(Debug, Clone)]
pub struct Weeks {
    next_start: Option<Date>,
    end: Date,
}

impl Iterator for Weeks {
    type Item = WeekWindow;

    fn next(&mut self) -> Option<WeekWindow> {
        let start = self.next_start.filter(|start| *start <= self.end)?;

        // Windows at the edge of the representable calendar clip to the
        // range end; a next start past `Date::MAX` ends the iteration.
        let end = start
            .checked_add(Duration::days(6))
            .map_or(self.end, |end| end.min(self.end));
        self.next_start = start.checked_add(Duration::days(7));

        Some(WeekWindow { start, end })
    }
}

/// Whether `date` falls on Saturday or Sunday.
pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}
