//! Schedule generation pipeline.
//!
//! Three stages produce a date list of exactly the requested size: project
//! clusters are placed, the weekly simulation spends most of the budget
//! with realistic rhythm, and the remainder distributor tops the list up
//! to the exact count.

use rand::Rng;
use thiserror::Error;
use time::Date;

use crate::calendar::AcademicCalendar;
use crate::range::DateRange;

use super::cluster::{ClusterGenConfig, ClusterGenerator};
use super::remainder::{RemainderConfig, RemainderDistributor};
use super::weekly::{WeeklySimConfig, WeeklySimulator};

/// Errors from schedule generation and plan building.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid range: end {end} is before start {start}")]
    InvalidRange { start: Date, end: Date },
    #[error("no acceptable day found after {attempts} attempts")]
    DistributionExhausted { attempts: u32 },
    #[error("message corpus is empty")]
    EmptyMessageCorpus,
}

/// End-to-end generator for a range's commit dates.
///
/// Output is grouped by week, not globally sorted; callers that need
/// chronological order sort the result.
#[derive(Debug, Clone)]
pub struct ScheduleGenerator {
    calendar: AcademicCalendar,
    cluster_config: ClusterGenConfig,
    weekly_config: WeeklySimConfig,
    remainder_config: RemainderConfig,
}

impl ScheduleGenerator {
    /// Creates a generator with the default calendar and configuration.
    pub fn new() -> Self {
        Self {
            calendar: AcademicCalendar::default(),
            cluster_config: ClusterGenConfig::default(),
            weekly_config: WeeklySimConfig::default(),
            remainder_config: RemainderConfig::default(),
        }
    }

    /// Sets the academic calendar.
    pub fn with_calendar(mut self, calendar: AcademicCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the cluster placement configuration.
    pub fn with_cluster_config(mut self, config: ClusterGenConfig) -> Self {
        self.cluster_config = config;
        self
    }

    /// Sets the weekly simulation configuration.
    pub fn with_weekly_config(mut self, config: WeeklySimConfig) -> Self {
        self.weekly_config = config;
        self
    }

    /// Sets the remainder distribution configuration.
    pub fn with_remainder_config(mut self, config: RemainderConfig) -> Self {
        self.remainder_config = config;
        self
    }

    /// Generates exactly `total` dates inside the range.
    pub fn generate(
        &self,
        range: DateRange,
        total: u32,
        rng: &mut impl Rng,
    ) -> Result<Vec<Date>, ScheduleError> {
        if total == 0 {
            return Ok(Vec::new());
        }

        let clusters = ClusterGenerator::with_config(self.cluster_config.clone()).generate(range, rng);

        let mut dates = WeeklySimulator::with_config(self.weekly_config.clone()).simulate(
            range,
            total,
            &self.calendar,
            &clusters,
            rng,
        );

        let shortfall = total - dates.len() as u32;
        if shortfall > 0 {
            let distributor = RemainderDistributor::with_config(self.remainder_config.clone());
            dates.extend(distributor.distribute(range, shortfall, rng)?);
        }

        Ok(dates)
    }
}

impl Default for ScheduleGenerator {
    fn default() -> Self {
        Self::new()
    }
}
