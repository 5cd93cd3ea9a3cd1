//! Week-by-week activity simulation.
//!
//! The simulator walks a range one week window at a time, composes an
//! intensity from the academic calendar, any covering project cluster, and
//! uniform noise, then spends commits on a sampled set of active days.
//! Weeks deliberately under-produce against the budget; the remainder pass
//! closes the gap afterwards.

use rand::Rng;
use rand::seq::SliceRandom;
use time::Date;

use crate::calendar::AcademicCalendar;
use crate::range::{DateRange, is_weekend};

use super::cluster::ProjectCluster;

/// Activity band a week falls into after all multipliers are composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntensityBand {
    Low,
    Normal,
    High,
}

/// Configuration for the weekly simulation.
#[derive(Debug, Clone)]
pub struct WeeklySimConfig {
    /// Intensities below this are low-activity weeks.
    pub low_intensity_cutoff: f64,
    /// Intensities at or above this are high-activity weeks.
    pub high_intensity_cutoff: f64,
    /// Uniform noise factor applied to every week, half-open.
    pub noise_range: (f64, f64),
    /// Probability that a week's candidate days include the weekend.
    pub weekend_probability: f64,
}

impl Default for WeeklySimConfig {
    fn default() -> Self {
        Self {
            low_intensity_cutoff: 0.5,
            high_intensity_cutoff: 1.0,
            noise_range: (0.7, 1.3),
            weekend_probability: 0.08,
        }
    }
}

impl WeeklySimConfig {
    fn band(&self, intensity: f64) -> IntensityBand {
        if intensity < self.low_intensity_cutoff {
            IntensityBand::Low
        } else if intensity < self.high_intensity_cutoff {
            IntensityBand::Normal
        } else {
            IntensityBand::High
        }
    }
}

/// Simulates commit activity across a range's weeks.
pub struct WeeklySimulator {
    config: WeeklySimConfig,
}

impl WeeklySimulator {
    /// Creates a simulator with default configuration.
    pub fn new() -> Self {
        Self {
            config: WeeklySimConfig::default(),
        }
    }

    /// Creates a simulator with custom configuration.
    pub fn with_config(config: WeeklySimConfig) -> Self {
        Self { config }
    }

    /// Emits up to `budget` event dates across the range.
    ///
    /// Each week picks active days without replacement from its candidate
    /// days (weekdays, plus the weekend on a rare roll) and assigns every
    /// active day a commit burst sized by the week's band. The walk stops
    /// as soon as the budget is spent, leaving later weeks untouched.
    pub fn simulate(
        &self,
        range: DateRange,
        budget: u32,
        calendar: &AcademicCalendar,
        clusters: &[ProjectCluster],
        rng: &mut impl Rng,
    ) -> Vec<Date> {
        let mut events = Vec::with_capacity(budget as usize);
        let mut remaining = budget;

        for week in range.weeks() {
            if remaining == 0 {
                break;
            }

            // First cluster covering the week start wins, mirroring the
            // calendar's declaration-order rule.
            let project = clusters.iter().find(|c| c.contains(week.start));

            let academic = calendar.intensity_for(week.start);
            let noise = rng.gen_range(self.config.noise_range.0..self.config.noise_range.1);
            let intensity = academic * project.map_or(1.0, |c| c.intensity) * noise;
            let band = self.config.band(intensity);

            let target = active_day_target(band, rng);
            let include_weekend = rng.r#gen::<f64>() < self.config.weekend_probability;

            let candidates: Vec<Date> = week
                .days()
                .filter(|day| include_weekend || !is_weekend(*day))
                .collect();
            let target = (target as usize).min(candidates.len());

            for &day in candidates.choose_multiple(rng, target) {
                if remaining == 0 {
                    return events;
                }

                let burst = burst_size(band, rng).min(remaining);
                for _ in 0..burst {
                    events.push(day);
                }
                remaining -= burst;
            }
        }

        events
    }
}

impl Default for WeeklySimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of active days targeted for a week in the given band.
fn active_day_target(band: IntensityBand, rng: &mut impl Rng) -> u32 {
    match band {
        IntensityBand::Low => rng.gen_range(1..=2),
        IntensityBand::Normal => rng.gen_range(2..=4),
        IntensityBand::High => rng.gen_range(4..=6),
    }
}

/// Commit burst assigned to one active day.
///
/// Tiered so that most days stay small while high weeks occasionally land
/// a marathon session of up to 15 commits.
fn burst_size(band: IntensityBand, rng: &mut impl Rng) -> u32 {
    let roll: f64 = rng.r#gen();
    match band {
        IntensityBand::Low => {
            if roll < 0.8 {
                1
            } else {
                2
            }
        }
        IntensityBand::Normal => {
            if roll < 0.5 {
                1
            } else if roll < 0.8 {
                rng.gen_range(2..=3)
            } else {
                rng.gen_range(4..=6)
            }
        }
        IntensityBand::High => {
            if roll < 0.3 {
                1
            } else if roll < 0.6 {
                rng.gen_range(2..=4)
            } else if roll < 0.8 {
                rng.gen_range(5..=8)
            } else {
                rng.gen_range(9..=15)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{AcademicPeriod, PeriodKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::Duration;
    use time::macros::date;

    fn make_range() -> DateRange {
        // Monday to Sunday, exactly 12 weeks.
        DateRange::new(date!(2025 - 01 - 06), date!(2025 - 03 - 30)).unwrap()
    }

    #[test]
    fn test_never_exceeds_budget() {
        let simulator = WeeklySimulator::new();
        let calendar = AcademicCalendar::default();
        let mut rng = StdRng::seed_from_u64(8);

        let events = simulator.simulate(make_range(), 20, &calendar, &[], &mut rng);
        assert!(events.len() <= 20);
    }

    #[test]
    fn test_events_stay_in_range() {
        let simulator = WeeklySimulator::new();
        let calendar = AcademicCalendar::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(15);
        let range = make_range();

        let events = simulator.simulate(range, 500, &calendar, &[], &mut rng);
        assert!(!events.is_empty());
        for event in &events {
            assert!(range.contains(*event));
        }
    }

    #[test]
    fn test_zero_weekend_probability_yields_weekdays_only() {
        let simulator = WeeklySimulator::with_config(WeeklySimConfig {
            weekend_probability: 0.0,
            ..Default::default()
        });
        let calendar = AcademicCalendar::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(23);

        let events = simulator.simulate(make_range(), 300, &calendar, &[], &mut rng);
        assert!(!events.is_empty());
        assert!(events.iter().all(|d| !is_weekend(*d)));
    }

    #[test]
    fn test_band_mechanics_bound_weekly_output() {
        let range = make_range();

        // Exam periods tile the whole range: every week lands in the low
        // band (0.2 * 1.3 noise ceiling stays under the 0.5 cutoff).
        let periods = (0..6)
            .map(|i| {
                AcademicPeriod::new(
                    range.start() + Duration::days(i * 14),
                    PeriodKind::ExamPeriod,
                    0.2,
                )
            })
            .collect();
        let low_calendar = AcademicCalendar::new(periods);
        let mut rng = StdRng::seed_from_u64(77);
        let low = WeeklySimulator::new().simulate(range, 10_000, &low_calendar, &[], &mut rng);

        // A range-wide cluster forces every week into the high band
        // (1.9 * 0.7 noise floor clears the 1.0 cutoff).
        let cluster = ProjectCluster {
            start: range.start(),
            end: range.end(),
            intensity: 1.9,
            commit_budget: 30,
        };
        let mut rng = StdRng::seed_from_u64(77);
        let high = WeeklySimulator::new().simulate(
            range,
            10_000,
            &AcademicCalendar::new(Vec::new()),
            &[cluster],
            &mut rng,
        );

        // Low weeks emit at most 2 days x 2 commits; high weeks at least
        // 4 days x 1 commit.
        assert!(low.len() <= 12 * 4);
        assert!(high.len() >= 12 * 4);
        assert!(high.len() > low.len());
    }

    #[test]
    fn test_fixed_seed_reproduces_events() {
        let calendar = AcademicCalendar::default();
        let range = make_range();

        let mut rng_a = StdRng::seed_from_u64(4242);
        let mut rng_b = StdRng::seed_from_u64(4242);
        let a = WeeklySimulator::new().simulate(range, 120, &calendar, &[], &mut rng_a);
        let b = WeeklySimulator::new().simulate(range, 120, &calendar, &[], &mut rng_b);

        assert_eq!(a, b);
    }

    #[test]
    fn test_active_day_targets_by_band() {
        let mut rng = StdRng::seed_from_u64(6);

        for _ in 0..200 {
            assert!((1..=2).contains(&active_day_target(IntensityBand::Low, &mut rng)));
            assert!((2..=4).contains(&active_day_target(IntensityBand::Normal, &mut rng)));
            assert!((4..=6).contains(&active_day_target(IntensityBand::High, &mut rng)));
        }
    }

    #[test]
    fn test_burst_sizes_stay_in_tier_bounds() {
        let mut rng = StdRng::seed_from_u64(12345);

        for _ in 0..1000 {
            assert!((1..=2).contains(&burst_size(IntensityBand::Low, &mut rng)));
            assert!((1..=6).contains(&burst_size(IntensityBand::Normal, &mut rng)));
            assert!((1..=15).contains(&burst_size(IntensityBand::High, &mut rng)));
        }
    }
}
