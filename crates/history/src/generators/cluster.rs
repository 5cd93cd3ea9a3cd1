//! Project cluster generation.
//!
//! Real histories are lumpy: a course project or side hustle concentrates
//! commits into a burst of two to four weeks, then goes quiet. Clusters are
//! placed at a fixed cadence across the range with jittered starts so runs
//! with different seeds produce different project timelines.

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::range::DateRange;

/// One simulated project: an interval of elevated activity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectCluster {
    pub start: Date,
    pub end: Date,
    /// Multiplier applied to weeks the cluster covers, stacked on top of
    /// the academic intensity.
    pub intensity: f64,
    /// Nominal commit budget for the project. Recorded for inspection and
    /// tuning; the weekly simulation draws from the run-wide budget instead.
    pub commit_budget: u32,
}

impl ProjectCluster {
    /// Whether `date` falls inside the cluster, inclusive at both ends.
    ///
    /// A cluster jittered past the range end can have `start > end`; such
    /// an interval is empty and contains nothing.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Configuration for cluster placement.
#[derive(Debug, Clone)]
pub struct ClusterGenConfig {
    /// Cadence of cluster anchors across the range, in days.
    pub spacing_days: i64,
    /// Maximum forward jitter applied to each anchor, inclusive.
    pub max_jitter_days: i64,
    /// Project duration bounds in days, inclusive.
    pub duration_days: (i64, i64),
    /// Intensity multiplier bounds, half-open.
    pub intensity_range: (f64, f64),
    /// Nominal budget bounds, half-open.
    pub commit_budget_range: (u32, u32),
}

impl Default for ClusterGenConfig {
    fn default() -> Self {
        Self {
            spacing_days: 90,
            max_jitter_days: 30,
            duration_days: (14, 28),
            intensity_range: (1.2, 2.0),
            commit_budget_range: (15, 40),
        }
    }
}

/// Places project clusters across a date range.
pub struct ClusterGenerator {
    config: ClusterGenConfig,
}

impl ClusterGenerator {
    /// Creates a generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: ClusterGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: ClusterGenConfig) -> Self {
        Self { config }
    }

    /// Generates `total_days / spacing_days + 1` clusters for the range.
    ///
    /// Each anchor sits one spacing past the previous and is jittered
    /// forward by up to `max_jitter_days`. Ends are clipped to the range,
    /// so a heavily jittered final cluster can come out empty.
    pub fn generate(&self, range: DateRange, rng: &mut impl Rng) -> Vec<ProjectCluster> {
        let count = range.total_days() / self.config.spacing_days + 1;

        (0..count)
            .map(|i| {
                let jitter = rng.gen_range(0..=self.config.max_jitter_days);
                let start = range
                    .start()
                    .checked_add(Duration::days(i * self.config.spacing_days + jitter));

                let (min_days, max_days) = self.config.duration_days;
                let duration = rng.gen_range(min_days..=max_days);

                let (min_intensity, max_intensity) = self.config.intensity_range;
                let intensity = rng.gen_range(min_intensity..max_intensity);

                let (min_budget, max_budget) = self.config.commit_budget_range;
                let commit_budget = rng.gen_range(min_budget..max_budget);

                // An anchor jittered past the representable calendar becomes
                // an empty interval, matching clusters clipped past the end.
                let (start, end) = match start {
                    Some(start) => (
                        start,
                        start
                            .checked_add(Duration::days(duration))
                            .map_or(range.end(), |end| end.min(range.end())),
                    ),
                    None => (Date::MAX, Date::MIN),
                };

                ProjectCluster {
                    start,
                    end,
                    intensity,
                    commit_budget,
                }
            })
            .collect()
    }
}

impl Default for ClusterGenerator {
    fn default() -> Self {
        Self::new()
    }
}
