//! Integration tests for the backfill pipeline.
//!
//! These tests verify end-to-end functionality including:
//! - Plan building across the preset academic-year ranges
//! - Weekday bias of the generated schedule
//! - Heatmap rendering from a built plan
//! - Git commit writing with backdated timestamps, and pushing
//!
//! The git tests create throwaway repositories under temporary directories;
//! nothing touches the host's git state.

use std::path::Path;

use git2::Repository;
use history::builders::{PlanBuilder, PlannedCommit};
use history::git::CommitWriter;
use history::heatmap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::macros::date;

/// Helper to create a repository with a local committer identity.
fn init_repo(dir: &Path) -> Repository {
    let repo = Repository::init(dir).expect("Failed to init repository");
    {
        let mut config = repo.config().expect("Failed to open repo config");
        config
            .set_str("user.name", "Test Author")
            .expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");
    }
    repo
}

/// Commits reachable from HEAD, newest first.
fn head_commits(repo: &Repository) -> Vec<git2::Oid> {
    let head = repo
        .head()
        .expect("Repository has no HEAD")
        .peel_to_commit()
        .expect("HEAD is not a commit");
    let mut walk = repo.revwalk().expect("Failed to create revwalk");
    walk.push(head.id()).expect("Failed to push HEAD");
    walk.collect::<Result<Vec<_>, _>>()
        .expect("Failed to walk history")
}

#[test]
fn test_academic_year_plan_counts() {
    let mut rng = StdRng::seed_from_u64(2024);
    let plan = PlanBuilder::academic_year_2024_25()
        .build(&mut rng)
        .expect("Failed to build plan");

    assert_eq!(plan.commits.len(), 152 + 301);
    assert_eq!(plan.metrics.total_commits, 453);

    // Commits are sorted, so the 2024 range is exactly the first 152.
    let fall_2024 = plan
        .commits
        .iter()
        .filter(|c| c.date <= date!(2024 - 12 - 31))
        .count();
    assert_eq!(fall_2024, 152);

    for commit in &plan.commits {
        assert!(commit.date >= date!(2024 - 10 - 26));
        assert!(commit.date <= date!(2025 - 09 - 15));
        assert!(!commit.message.is_empty());
    }
    for pair in plan.commits.windows(2) {
        assert!(pair[0].date <= pair[1].date);
    }
}

#[test]
fn test_same_seed_reproduces_plan() {
    let build = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        PlanBuilder::academic_year_2024_25()
            .build(&mut rng)
            .expect("Failed to build plan")
    };

    let a = build(301);
    let b = build(301);

    assert_eq!(a.commits, b.commits);
    assert_eq!(a.metrics, b.metrics);
}

#[test]
fn test_weekend_fraction_stays_low() {
    let mut rng = StdRng::seed_from_u64(7777);
    let plan = PlanBuilder::new()
        .with_range(date!(2025 - 01 - 01), date!(2025 - 12 - 31), 800)
        .build(&mut rng)
        .expect("Failed to build plan");

    assert_eq!(plan.metrics.total_commits, 800);

    // Two of seven days are weekend days (~28.6%). The simulated schedule
    // should stay far below that; the exact value varies by seed.
    let weekend_fraction = plan.metrics.weekend_commits as f64 / 800.0;
    assert!(
        weekend_fraction < 0.15,
        "weekend fraction too high: {weekend_fraction}"
    );
}

#[test]
fn test_heatmap_renders_built_plan() {
    let mut rng = StdRng::seed_from_u64(60);
    let plan = PlanBuilder::new()
        .with_range(date!(2025 - 02 - 03), date!(2025 - 03 - 30), 60)
        .build(&mut rng)
        .expect("Failed to build plan");

    let svg = heatmap::render(&plan.dates()).expect("Plan should render");

    assert!(svg.starts_with("<svg "));
    assert!(svg.ends_with("</svg>\n"));

    // Whole weeks only, and the grid cannot exceed the range's nine
    // Sunday-aligned weeks.
    let cells = svg.matches("<rect x=").count();
    assert_eq!(cells % 7, 0);
    assert!(cells >= 7 && cells <= 9 * 7);

    // 60 commits somewhere in the grid means at least one active cell.
    let active = svg.matches(r##"fill="#c6e48b""##).count()
        + svg.matches(r##"fill="#7bc96f""##).count()
        + svg.matches(r##"fill="#239a3b""##).count()
        + svg.matches(r##"fill="#196127""##).count();
    assert!(active > 0);

    for label in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"] {
        assert!(svg.contains(&format!(">{label}</text>")));
    }
}

#[test]
fn test_commit_writer_backdates_history() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let repo = init_repo(dir.path());

    let commits = vec![
        PlannedCommit {
            date: date!(2025 - 03 - 03),
            message: "add database schema for student records".into(),
        },
        PlannedCommit {
            date: date!(2025 - 03 - 04),
            message: "fix login validation bug".into(),
        },
        PlannedCommit {
            date: date!(2025 - 03 - 07),
            message: "update documentation".into(),
        },
    ];

    let writer = CommitWriter::open(dir.path()).expect("Failed to open writer");
    let written = writer.write_all(&commits).expect("Failed to write commits");
    assert_eq!(written, 3);

    let ids = head_commits(&repo);
    assert_eq!(ids.len(), 3);

    // Noon UTC of each planned date, oldest commit first.
    let expected_epochs = [1_741_003_200_i64, 1_741_089_600, 1_741_348_800];
    for ((id, planned), epoch) in ids.iter().rev().zip(&commits).zip(expected_epochs) {
        let commit = repo.find_commit(*id).expect("Missing commit");
        assert_eq!(commit.message().unwrap(), planned.message);
        assert_eq!(commit.author().when().seconds(), epoch);
        assert_eq!(commit.time().seconds(), epoch);
        assert_eq!(commit.author().when().offset_minutes(), 0);
        assert_eq!(commit.author().name().unwrap(), "Test Author");
    }

    // The marker file holds the last planned date.
    let marker = std::fs::read_to_string(dir.path().join("data.json"))
        .expect("Missing marker file");
    assert_eq!(marker, r#"{"date":"2025-03-07"}"#);
}

#[test]
fn test_generated_plan_writes_all_commits() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let repo = init_repo(dir.path());

    let mut rng = StdRng::seed_from_u64(12);
    let plan = PlanBuilder::new()
        .with_range(date!(2025 - 03 - 03), date!(2025 - 03 - 21), 12)
        .build(&mut rng)
        .expect("Failed to build plan");

    let writer = CommitWriter::open(dir.path()).expect("Failed to open writer");
    writer.write_all(&plan.commits).expect("Failed to write commits");

    assert_eq!(head_commits(&repo).len(), 12);
}

#[test]
fn test_push_to_local_bare_remote() {
    let remote_dir = tempfile::tempdir().expect("Failed to create remote tempdir");
    let bare = Repository::init_bare(remote_dir.path()).expect("Failed to init bare repo");

    let repo_dir = tempfile::tempdir().expect("Failed to create repo tempdir");
    let repo = init_repo(repo_dir.path());
    repo.remote("origin", remote_dir.path().to_str().unwrap())
        .expect("Failed to add remote");

    let commits = vec![
        PlannedCommit {
            date: date!(2025 - 05 - 05),
            message: "implement caching mechanism".into(),
        },
        PlannedCommit {
            date: date!(2025 - 05 - 06),
            message: "fix race condition".into(),
        },
    ];

    let writer = CommitWriter::open(repo_dir.path()).expect("Failed to open writer");
    writer.write_all(&commits).expect("Failed to write commits");

    let branch = repo
        .head()
        .expect("Repository has no HEAD")
        .shorthand()
        .expect("HEAD has no shorthand")
        .to_string();
    writer.push("origin", &branch).expect("Failed to push");

    let pushed = bare
        .find_reference(&format!("refs/heads/{branch}"))
        .expect("Branch missing on remote")
        .peel_to_commit()
        .expect("Remote branch is not a commit");
    assert_eq!(pushed.message().unwrap(), "fix race condition");
}

#[test]
fn test_push_supports_network_remotes() {
    // Transports are compile-time libgit2 features. A build without them
    // rejects ssh:// and https:// remote URLs before any network activity,
    // so the credentials callback would be unreachable.
    let version = git2::Version::get();
    assert!(version.ssh(), "libgit2 built without the ssh transport");
    assert!(version.https(), "libgit2 built without the https transport");
}
