//! Synthetic commit history generation for commit-canvas.
//!
//! This crate produces commit schedules whose shape mimics a real developer's
//! year: an academic calendar dampens exam weeks and breaks, randomized
//! project clusters concentrate work into bursts, weekends stay mostly quiet,
//! and a remainder pass guarantees the exact requested commit count. A built
//! plan can be rendered as a contribution heatmap or written into a git
//! repository as backdated commits.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use history::prelude::*;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use time::macros::date;
//!
//! let mut rng = StdRng::seed_from_u64(12345);
//!
//! let plan = PlanBuilder::new()
//!     .with_range(date!(2024 - 10 - 26), date!(2024 - 12 - 31), 152)
//!     .with_range(date!(2025 - 01 - 01), date!(2025 - 09 - 15), 301)
//!     .build(&mut rng)?;
//!
//! let svg = history::heatmap::render(&plan.dates());
//! CommitWriter::open(".")?.write_all(&plan.commits)?;
//! ```

pub mod builders;
pub mod calendar;
pub mod generators;
pub mod git;
pub mod heatmap;
pub mod range;

pub use range::{DateRange, WeekWindow};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{BackfillPlan, PlanBuilder, PlanMetrics, PlannedCommit, RangeMetrics};
    pub use crate::calendar::{AcademicCalendar, AcademicPeriod, PeriodKind};
    pub use crate::generators::{
        ClusterGenConfig, ClusterGenerator, MessageCorpus, ProjectCluster, RemainderConfig,
        RemainderDistributor, ScheduleError, ScheduleGenerator, WeeklySimConfig, WeeklySimulator,
    };
    pub use crate::git::{CommitWriter, GitError};
    pub use crate::range::{DateRange, WeekWindow, is_weekend};
}
