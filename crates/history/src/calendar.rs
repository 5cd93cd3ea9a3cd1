//! Academic calendar intensity model.
//!
//! Commit activity tracks the rhythm of a student year: deadlines spike it,
//! exam periods and breaks suppress it. The calendar maps any week to a
//! multiplier by checking which declared period covers the week's start.

use serde::{Deserialize, Serialize};
use time::macros::date;
use time::{Date, Duration};

/// Length of the window each period anchor covers.
const PERIOD_WINDOW_DAYS: i64 = 14;

/// Kind of academic period an anchor marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    SemesterStart,
    MidSemester,
    ProjectDeadline,
    PreExam,
    ExamPeriod,
    SpringBreak,
    WinterBreak,
    SummerBreak,
    SummerProjects,
    PreSemester,
}

/// One calendar anchor: a date, its period kind, and the intensity
/// multiplier applied to weeks it covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AcademicPeriod {
    pub anchor: Date,
    pub kind: PeriodKind,
    pub intensity: f64,
}

impl AcademicPeriod {
    pub const fn new(anchor: Date, kind: PeriodKind, intensity: f64) -> Self {
        Self {
            anchor,
            kind,
            intensity,
        }
    }

    /// Whether this period's 14-day window covers `week_start`.
    ///
    /// The window is inclusive at the anchor and exclusive at the far end,
    /// so a week starting exactly on the anchor gets the period's intensity.
    pub fn covers(&self, week_start: Date) -> bool {
        week_start >= self.anchor && week_start < self.anchor + Duration::days(PERIOD_WINDOW_DAYS)
    }
}

/// Ordered set of academic periods.
///
/// Lookup scans periods in declaration order and the first covering period
/// wins, so overlapping windows resolve deterministically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicCalendar {
    periods: Vec<AcademicPeriod>,
}

impl AcademicCalendar {
    pub fn new(periods: Vec<AcademicPeriod>) -> Self {
        Self { periods }
    }

    /// Intensity multiplier for the week starting at `week_start`.
    ///
    /// Weeks no period covers are ordinary weeks with a multiplier of 1.0.
    pub fn intensity_for(&self, week_start: Date) -> f64 {
        self.periods
            .iter()
            .find(|period| period.covers(week_start))
            .map_or(1.0, |period| period.intensity)
    }

    pub fn periods(&self) -> &[AcademicPeriod] {
        &self.periods
    }
}

impl Default for AcademicCalendar {
    /// The 2024/25 academic year as lived by a CS student: fall deadlines,
    /// winter exams, spring projects, and a productive summer.
    fn default() -> Self {
        Self::new(vec![
            AcademicPeriod::new(date!(2024 - 10 - 26), PeriodKind::MidSemester, 0.7),
            AcademicPeriod::new(date!(2024 - 11 - 15), PeriodKind::ProjectDeadline, 1.2),
            AcademicPeriod::new(date!(2024 - 11 - 25), PeriodKind::PreExam, 0.4),
            AcademicPeriod::new(date!(2024 - 12 - 10), PeriodKind::ExamPeriod, 0.2),
            AcademicPeriod::new(date!(2024 - 12 - 20), PeriodKind::WinterBreak, 0.1),
            AcademicPeriod::new(date!(2025 - 01 - 15), PeriodKind::SemesterStart, 0.8),
            AcademicPeriod::new(date!(2025 - 02 - 15), PeriodKind::MidSemester, 0.7),
            AcademicPeriod::new(date!(2025 - 03 - 10), PeriodKind::SpringBreak, 0.3),
            AcademicPeriod::new(date!(2025 - 04 - 15), PeriodKind::ProjectDeadline, 1.3),
            AcademicPeriod::new(date!(2025 - 05 - 01), PeriodKind::PreExam, 0.5),
            AcademicPeriod::new(date!(2025 - 05 - 15), PeriodKind::ExamPeriod, 0.2),
            AcademicPeriod::new(date!(2025 - 06 - 01), PeriodKind::SummerBreak, 0.4),
            AcademicPeriod::new(date!(2025 - 07 - 15), PeriodKind::SummerProjects, 0.9),
            AcademicPeriod::new(date!(2025 - 08 - 15), PeriodKind::PreSemester, 0.6),
        ])
    }
}
