//! Builders assembling generator output into executable plans.

mod plan;

pub use plan::{BackfillPlan, PlanBuilder, PlanMetrics, PlannedCommit, RangeMetrics};
