//! Remainder distribution.
//!
//! The weekly simulation aims low, so a run usually ends with unplaced
//! commits. The distributor scatters that shortfall uniformly across the
//! range with rejection sampling that keeps the weekday skew intact.

use rand::Rng;
use time::Date;

use crate::range::{DateRange, is_weekend};

use super::ScheduleError;

/// Configuration for remainder placement.
#[derive(Debug, Clone)]
pub struct RemainderConfig {
    /// Probability that a drawn weekend day is kept. Weekdays are always
    /// kept.
    pub weekend_accept_probability: f64,
    /// Rejection draws allowed per event before giving up.
    pub max_attempts: u32,
}

impl Default for RemainderConfig {
    fn default() -> Self {
        Self {
            weekend_accept_probability: 0.1,
            max_attempts: 1_000,
        }
    }
}

/// Scatters leftover events across a range.
pub struct RemainderDistributor {
    config: RemainderConfig,
}

impl RemainderDistributor {
    /// Creates a distributor with default configuration.
    pub fn new() -> Self {
        Self {
            config: RemainderConfig::default(),
        }
    }

    /// Creates a distributor with custom configuration.
    pub fn with_config(config: RemainderConfig) -> Self {
        Self { config }
    }

    /// Places exactly `count` events inside the range.
    ///
    /// Fails only when rejection sampling exhausts its attempt budget,
    /// which takes a pathological configuration such as a weekend-only
    /// range with weekend acceptance at zero.
    pub fn distribute(
        &self,
        range: DateRange,
        count: u32,
        rng: &mut impl Rng,
    ) -> Result<Vec<Date>, ScheduleError> {
        let mut events = Vec::with_capacity(count as usize);
        for _ in 0..count {
            events.push(self.pick_day(range, rng)?);
        }
        Ok(events)
    }

    fn pick_day(&self, range: DateRange, rng: &mut impl Rng) -> Result<Date, ScheduleError> {
        for _ in 0..self.config.max_attempts {
            let day = range.day_at(rng.gen_range(0..range.total_days()));

            if !is_weekend(day) || rng.r#gen::<f64>() < self.config.weekend_accept_probability {
                return Ok(day);
            }
        }

        Err(ScheduleError::DistributionExhausted {
            attempts: self.config.max_attempts,
        })
    }
}

impl Default for RemainderDistributor {
    fn default() -> Self {
        Self::new()
    }
}
