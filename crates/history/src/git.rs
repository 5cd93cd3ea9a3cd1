//! Git repository writing.
//!
//! Turns a built plan into actual history: each planned commit rewrites the
//! tracked marker file, stages it, and commits with author and committer
//! timestamps backdated to the planned date. Pushing is optional and uses
//! the same credentials command-line git would.

use std::fs;
use std::path::{Path, PathBuf};

use git2::{
    Commit, Cred, CredentialType, ErrorCode, Oid, PushOptions, RemoteCallbacks, Repository,
    Signature, Time,
};
use serde::Serialize;
use thiserror::Error;
use time::macros::time;
use time::{Date, PrimitiveDateTime};
use tracing::info;

use crate::builders::PlannedCommit;

/// File the writer rewrites for every commit, relative to the repo root.
const DEFAULT_MARKER_FILE: &str = "data.json";

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git operation failed: {0}")]
    Repo(#[from] git2::Error),
    #[error("marker file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("marker serialization failed: {0}")]
    Marker(#[from] serde_json::Error),
    #[error("repository config has no user.name/user.email; set a git identity first")]
    MissingIdentity,
    #[error("repository is bare; a working tree is required")]
    BareRepository,
}

/// Contents of the tracked marker file, one date per commit.
#[derive(Debug, Serialize)]
struct Marker {
    date: Date,
}

/// Writes planned commits into a git repository.
///
/// Commits are stamped at noon UTC of their planned date so they land on
/// that calendar day in any timezone a contribution graph renders in;
/// midnight would slip to the previous day west of UTC.
pub struct CommitWriter {
    repo: Repository,
    workdir: PathBuf,
    marker_file: PathBuf,
    name: String,
    email: String,
    batch_size: usize,
}

impl CommitWriter {
    /// Opens the repository at `path` and reads the committer identity
    /// from its git config.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let repo = Repository::open(path)?;
        let workdir = repo
            .workdir()
            .ok_or(GitError::BareRepository)?
            .to_path_buf();

        let config = repo.config()?;
        let name = config
            .get_string("user.name")
            .map_err(|_| GitError::MissingIdentity)?;
        let email = config
            .get_string("user.email")
            .map_err(|_| GitError::MissingIdentity)?;

        Ok(Self {
            repo,
            workdir,
            marker_file: PathBuf::from(DEFAULT_MARKER_FILE),
            name,
            email,
            batch_size: 50,
        })
    }

    /// Sets the marker file path, relative to the repository root.
    pub fn with_marker_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.marker_file = path.into();
        self
    }

    /// Sets how many commits are written between progress messages.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Writes one planned commit and returns its id.
    ///
    /// The marker file is overwritten with the planned date, staged, and
    /// committed on HEAD with both signature timestamps backdated.
    pub fn write(&self, commit: &PlannedCommit) -> Result<Oid, GitError> {
        let marker = Marker { date: commit.date };
        fs::write(
            self.workdir.join(&self.marker_file),
            serde_json::to_vec(&marker)?,
        )?;

        let mut index = self.repo.index()?;
        index.add_path(&self.marker_file)?;
        index.write()?;
        let tree = self.repo.find_tree(index.write_tree()?)?;

        let when = Time::new(commit_epoch(commit.date), 0);
        let author = Signature::new(&self.name, &self.email, &when)?;

        // A fresh repository has no HEAD commit yet; the first write
        // becomes the root commit.
        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(err) if matches!(err.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(err) => return Err(err.into()),
        };
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &author,
            &author,
            &commit.message,
            &tree,
            &parents,
        )?;
        Ok(oid)
    }

    /// Writes every commit of a plan, in order.
    pub fn write_all(&self, commits: &[PlannedCommit]) -> Result<usize, GitError> {
        info!("Writing {} commits...", commits.len());

        for (i, commit) in commits.iter().enumerate() {
            self.write(commit)?;

            if (i + 1) % self.batch_size == 0 {
                info!("  Wrote {}/{} commits", i + 1, commits.len());
            }
        }

        info!("Wrote {} commits", commits.len());
        Ok(commits.len())
    }

    /// Pushes `branch` to `remote_name`.
    ///
    /// Works against local, ssh, and https remotes. Credentials come from
    /// the ssh agent or the configured credential helper, depending on what
    /// the remote asks for; local remotes need none.
    pub fn push(&self, remote_name: &str, branch: &str) -> Result<(), GitError> {
        info!("Pushing {} to {}...", branch, remote_name);

        let mut remote = self.repo.find_remote(remote_name)?;

        let config = self.repo.config()?;
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |url, username, allowed| {
            if allowed.contains(CredentialType::SSH_KEY) {
                Cred::ssh_key_from_agent(username.unwrap_or("git"))
            } else {
                Cred::credential_helper(&config, url, username)
            }
        });

        let mut options = PushOptions::new();
        options.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        remote.push(&[refspec.as_str()], Some(&mut options))?;

        info!("Pushed {} to {}", branch, remote_name);
        Ok(())
    }
}

/// Unix timestamp for noon UTC of `date`.
fn commit_epoch(date: Date) -> i64 {
    PrimitiveDateTime::new(date, time!(12:00))
        .assume_utc()
        .unix_timestamp()
}
