//! Generators for synthetic commit schedules.
//!
//! - [`cluster`]: project clusters, intervals of elevated activity
//! - [`weekly`]: week-by-week activity simulation
//! - [`remainder`]: exact-count top-up of the weekly shortfall
//! - [`schedule`]: the pipeline composing the three stages
//! - [`message`]: commit message pool

pub mod cluster;
pub mod message;
pub mod remainder;
pub mod schedule;
pub mod weekly;

pub use cluster::{ClusterGenConfig, ClusterGenerator, ProjectCluster};
pub use message::MessageCorpus;
pub use remainder::{RemainderConfig, RemainderDistributor};
pub use schedule::{ScheduleError, ScheduleGenerator};
pub use weekly::{WeeklySimConfig, WeeklySimulator};
