//! Backfill plan construction.
//!
//! A plan is the serializable unit of work: every commit that will be
//! written, in order, with the metrics used to sanity-check it before
//! anything touches a repository.

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::date;

use crate::calendar::AcademicCalendar;
use crate::generators::{MessageCorpus, ScheduleError, ScheduleGenerator};
use crate::range::{DateRange, is_weekend};

/// One planned commit: a date paired with its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedCommit {
    pub date: Date,
    pub message: String,
}

/// Per-range counters recorded during plan building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeMetrics {
    pub range: DateRange,
    /// Commits requested for the range.
    pub requested: u32,
    /// Commits produced for the range. Matches `requested` by the
    /// generator's exact-count contract; recorded so consumers can audit
    /// a saved plan without regenerating it.
    pub produced: usize,
}

/// Counters describing a built plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanMetrics {
    pub ranges: Vec<RangeMetrics>,
    pub total_commits: usize,
    pub weekday_commits: usize,
    pub weekend_commits: usize,
}

/// A complete backfill plan: chronologically ordered commits plus metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackfillPlan {
    pub commits: Vec<PlannedCommit>,
    pub metrics: PlanMetrics,
}

impl BackfillPlan {
    /// The plan's dates, in commit order.
    pub fn dates(&self) -> Vec<Date> {
        self.commits.iter().map(|c| c.date).collect()
    }
}

/// One requested generation range with its target count.
#[derive(Debug, Clone, Copy)]
struct RangeRequest {
    start: Date,
    end: Date,
    commits: u32,
}

/// Fluent builder assembling a [`BackfillPlan`] from one or more ranges.
pub struct PlanBuilder {
    ranges: Vec<RangeRequest>,
    calendar: AcademicCalendar,
    messages: MessageCorpus,
}

impl PlanBuilder {
    /// Creates an empty builder with the default calendar and messages.
    pub fn new() -> Self {
        Self {
            ranges: Vec::new(),
            calendar: AcademicCalendar::default(),
            messages: MessageCorpus::default(),
        }
    }

    /// Adds a range with its target commit count. Repeatable.
    pub fn with_range(mut self, start: Date, end: Date, commits: u32) -> Self {
        self.ranges.push(RangeRequest {
            start,
            end,
            commits,
        });
        self
    }

    /// Sets the academic calendar driving weekly intensity.
    pub fn with_calendar(mut self, calendar: AcademicCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the commit message pool.
    pub fn with_messages(mut self, messages: MessageCorpus) -> Self {
        self.messages = messages;
        self
    }

    /// The preset this tool was written for: 152 commits across late fall
    /// 2024 and 301 across spring through mid-September 2025.
    pub fn academic_year_2024_25() -> Self {
        Self::new()
            .with_range(date!(2024 - 10 - 26), date!(2024 - 12 - 31), 152)
            .with_range(date!(2025 - 01 - 01), date!(2025 - 09 - 15), 301)
    }

    /// Builds the plan.
    ///
    /// Validates every range up front, generates each range's schedule,
    /// sorts the combined dates chronologically, and pairs each with a
    /// message from the pool.
    pub fn build(&self, rng: &mut impl Rng) -> Result<BackfillPlan, ScheduleError> {
        if self.messages.is_empty() {
            return Err(ScheduleError::EmptyMessageCorpus);
        }

        // Reject any bad range before generation work starts.
        let ranges = self
            .ranges
            .iter()
            .map(|req| DateRange::new(req.start, req.end).map(|range| (range, req.commits)))
            .collect::<Result<Vec<_>, _>>()?;

        let generator = ScheduleGenerator::new().with_calendar(self.calendar.clone());

        let mut dates = Vec::new();
        let mut range_metrics = Vec::with_capacity(ranges.len());

        for (range, requested) in ranges {
            let produced = generator.generate(range, requested, rng)?;
            range_metrics.push(RangeMetrics {
                range,
                requested,
                produced: produced.len(),
            });
            dates.extend(produced);
        }

        dates.sort_unstable();

        let mut commits = Vec::with_capacity(dates.len());
        for date in dates {
            let message = self
                .messages
                .pick(rng)
                .ok_or(ScheduleError::EmptyMessageCorpus)?;
            commits.push(PlannedCommit {
                date,
                message: message.to_string(),
            });
        }

        let weekend_commits = commits.iter().filter(|c| is_weekend(c.date)).count();
        let metrics = PlanMetrics {
            ranges: range_metrics,
            total_commits: commits.len(),
            weekday_commits: commits.len() - weekend_commits,
            weekend_commits,
        };

        Ok(BackfillPlan { commits, metrics })
    }
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}
