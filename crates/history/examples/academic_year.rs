//! Example: plan the 2024/25 academic year and render its heatmap.
//!
//! Builds the preset two-range plan (152 commits for late fall 2024, 301
//! for spring through mid-September 2025), prints its metrics, and writes
//! a GitHub-style SVG preview into the working directory. No repository is
//! touched.
//!
//! Run with:
//! ```
//! cargo run -p history --example academic_year
//! ```

use history::builders::PlanBuilder;
use history::heatmap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut rng = StdRng::seed_from_u64(12345); // Reproducible schedule

    let plan = PlanBuilder::academic_year_2024_25().build(&mut rng)?;

    tracing::info!("Plan built!");
    tracing::info!("  Commits: {}", plan.metrics.total_commits);
    tracing::info!("  Weekday: {}", plan.metrics.weekday_commits);
    tracing::info!("  Weekend: {}", plan.metrics.weekend_commits);

    for range in &plan.metrics.ranges {
        tracing::info!(
            "  Range {} to {}: {} commits",
            range.range.start(),
            range.range.end(),
            range.produced
        );
    }

    if let Some(svg) = heatmap::render(&plan.dates()) {
        std::fs::write("preview.svg", svg)?;
        tracing::info!("Preview saved as preview.svg");
    }

    Ok(())
}
