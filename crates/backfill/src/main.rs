//! Command-line frontend for commit-canvas.
//!
//! The pipeline runs in three file-backed stages: `plan` generates a commit
//! schedule and saves it as JSON, `preview` renders a saved plan as an SVG
//! contribution heatmap, and `apply` writes the plan into a repository as
//! backdated commits. `run` chains all three.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use history::builders::{BackfillPlan, PlanBuilder};
use history::git::CommitWriter;
use history::heatmap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::Date;
use time::macros::format_description;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "backfill",
    about = "Plan, preview, and apply realistic synthetic commit histories",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Generate a commit plan for one or more date ranges
    Plan {
        /// First day of the range (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start: Date,

        /// Last day of the range, inclusive (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        end: Date,

        /// Commits to spread across the range
        #[arg(long)]
        commits: u32,

        /// Additional range as START..END=COUNT, repeatable
        #[arg(long, value_parser = parse_range_arg)]
        range: Vec<RangeArg>,

        /// RNG seed for a reproducible plan (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Output path for the plan artifact
        #[arg(long, default_value = "plan.json")]
        out: PathBuf,
    },

    /// Render a saved plan as a GitHub-style SVG heatmap
    Preview {
        /// Input plan path
        #[arg(long, default_value = "plan.json")]
        plan: PathBuf,

        /// Output SVG path
        #[arg(long, default_value = "preview.svg")]
        out: PathBuf,
    },

    /// Write a saved plan into a repository as backdated commits
    Apply {
        /// Input plan path
        #[arg(long, default_value = "plan.json")]
        plan: PathBuf,

        /// Repository to write into
        #[arg(long, default_value = ".")]
        repo: PathBuf,

        /// Push the branch after writing
        #[arg(long, default_value_t = false)]
        push: bool,

        /// Remote to push to
        #[arg(long, default_value = "origin")]
        remote: String,

        /// Branch to push
        #[arg(long, default_value = "main")]
        branch: String,
    },

    /// Plan, preview, and apply in one invocation
    Run {
        /// First day of the range (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start: Date,

        /// Last day of the range, inclusive (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        end: Date,

        /// Commits to spread across the range
        #[arg(long)]
        commits: u32,

        /// Additional range as START..END=COUNT, repeatable
        #[arg(long, value_parser = parse_range_arg)]
        range: Vec<RangeArg>,

        /// RNG seed for a reproducible plan (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Output path for the plan artifact
        #[arg(long, default_value = "plan.json")]
        plan_out: PathBuf,

        /// Output SVG path for the preview
        #[arg(long, default_value = "preview.svg")]
        preview_out: PathBuf,

        /// Repository to write into
        #[arg(long, default_value = ".")]
        repo: PathBuf,

        /// Push the branch after writing
        #[arg(long, default_value_t = false)]
        push: bool,

        /// Remote to push to
        #[arg(long, default_value = "origin")]
        remote: String,

        /// Branch to push
        #[arg(long, default_value = "main")]
        branch: String,
    },
}

/// One extra generation range, parsed from `START..END=COUNT`.
#[derive(Debug, Clone)]
struct RangeArg {
    start: Date,
    end: Date,
    commits: u32,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Plan {
            start,
            end,
            commits,
            range,
            seed,
            out,
        } => plan(start, end, commits, &range, seed, &out),

        Cmd::Preview { plan, out } => preview(&plan, &out),

        Cmd::Apply {
            plan,
            repo,
            push,
            remote,
            branch,
        } => apply(&plan, &repo, push, &remote, &branch),

        Cmd::Run {
            start,
            end,
            commits,
            range,
            seed,
            plan_out,
            preview_out,
            repo,
            push,
            remote,
            branch,
        } => {
            plan(start, end, commits, &range, seed, &plan_out)?;
            preview(&plan_out, &preview_out)?;
            apply(&plan_out, &repo, push, &remote, &branch)
        }
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn plan(
    start: Date,
    end: Date,
    commits: u32,
    extra: &[RangeArg],
    seed: Option<u64>,
    out: &Path,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut builder = PlanBuilder::new().with_range(start, end, commits);
    for range in extra {
        builder = builder.with_range(range.start, range.end, range.commits);
    }

    let plan = builder.build(&mut rng).context("building commit plan")?;

    for range in &plan.metrics.ranges {
        info!(
            "  {} to {}: {} commits",
            range.range.start(),
            range.range.end(),
            range.produced
        );
    }
    info!(
        "  Weekday/weekend split: {}/{}",
        plan.metrics.weekday_commits, plan.metrics.weekend_commits
    );

    ensure_parent_dir(out)?;
    save_plan(out, &plan)?;

    println!(
        "Planned {} commits across {} ranges → {}",
        plan.metrics.total_commits,
        plan.metrics.ranges.len(),
        out.display()
    );
    Ok(())
}

fn preview(plan_path: &Path, out: &Path) -> Result<()> {
    let plan = load_plan(plan_path)?;

    let svg = match heatmap::render(&plan.dates()) {
        Some(svg) => svg,
        None => bail!("plan {} has no commits to preview", plan_path.display()),
    };

    ensure_parent_dir(out)?;
    std::fs::write(out, svg).with_context(|| format!("writing {}", out.display()))?;

    println!(
        "Preview of {} commits → {}",
        plan.metrics.total_commits,
        out.display()
    );
    Ok(())
}

fn apply(plan_path: &Path, repo: &Path, push: bool, remote: &str, branch: &str) -> Result<()> {
    let plan = load_plan(plan_path)?;
    info!(repo = %repo.display(), commits = plan.commits.len(), "applying plan");

    let writer = CommitWriter::open(repo)
        .with_context(|| format!("opening repository {}", repo.display()))?;
    let written = writer.write_all(&plan.commits).context("writing commits")?;

    if push {
        writer
            .push(remote, branch)
            .with_context(|| format!("pushing {branch} to {remote}"))?;
        println!("Wrote {written} commits and pushed {branch} to {remote}");
    } else {
        println!("Wrote {written} commits to {}", repo.display());
    }
    Ok(())
}

fn save_plan(path: &Path, plan: &BackfillPlan) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), plan).context("serializing plan")?;
    Ok(())
}

fn load_plan(path: &Path) -> Result<BackfillPlan> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing plan {}", path.display()))
}

/// Ensure the parent directory for a file exists.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", dir.display()))?;
        }
    }
    Ok(())
}

fn parse_date(s: &str) -> Result<Date, String> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("invalid date {s:?} (expected YYYY-MM-DD): {e}"))
}

fn parse_range_arg(s: &str) -> Result<RangeArg, String> {
    let (span, count) = s
        .split_once('=')
        .ok_or_else(|| format!("expected START..END=COUNT, got {s:?}"))?;
    let (start, end) = span
        .split_once("..")
        .ok_or_else(|| format!("expected START..END=COUNT, got {s:?}"))?;

    Ok(RangeArg {
        start: parse_date(start)?,
        end: parse_date(end)?,
        commits: count
            .parse()
            .map_err(|e| format!("invalid commit count {count:?}: {e}"))?,
    })
}
