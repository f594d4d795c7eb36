//! Pull request lookup, creation and update via the `gh` CLI.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::CommandError;
use crate::process;

/// A remote pull request's identifying number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PullRequestRecord {
    pub number: u64,
}

/// The hosted side of a pull request workflow.
///
/// This abstraction allows mocking the `gh` subprocess in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrHost: Send + Sync {
    /// The open pull request whose head is `branch`, if any.
    async fn find_open_pr(&self, branch: &str) -> Result<Option<PullRequestRecord>, CommandError>;

    /// Create a draft pull request for the current branch.
    async fn create_draft(&self, title: &str, body: &str) -> Result<(), CommandError>;

    async fn update_body(&self, number: u64, body: &str) -> Result<(), CommandError>;

    async fn open_in_browser(&self, number: u64) -> Result<(), CommandError>;
}

/// Drives the GitHub CLI.
#[derive(Debug, Clone, Default)]
pub struct GhCli {
    workdir: Option<PathBuf>,
}

impl GhCli {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    async fn gh(&self, args: &[&str]) -> Result<String, CommandError> {
        process::run("gh", args, self.workdir.as_deref()).await
    }
}

#[async_trait]
impl PrHost for GhCli {
    async fn find_open_pr(&self, branch: &str) -> Result<Option<PullRequestRecord>, CommandError> {
        debug!("Listing PRs for branch {}", branch);
        let out = self
            .gh(&["pr", "list", "--head", branch, "--json", "number"])
            .await?;
        first_pull_request(&out, branch)
    }

    async fn create_draft(&self, title: &str, body: &str) -> Result<(), CommandError> {
        self.gh(&["pr", "create", "--draft", "--title", title, "--body", body])
            .await
            .map(|_| ())
    }

    async fn update_body(&self, number: u64, body: &str) -> Result<(), CommandError> {
        let number = number.to_string();
        self.gh(&["pr", "edit", &number, "--body", body])
            .await
            .map(|_| ())
    }

    async fn open_in_browser(&self, number: u64) -> Result<(), CommandError> {
        let number = number.to_string();
        self.gh(&["pr", "view", &number, "--web"]).await.map(|_| ())
    }
}

/// Parse `gh pr list --json number` output and keep the first entry.
///
/// More than one open PR for a branch is unexpected; the first is used and a
/// warning is logged.
pub fn first_pull_request(
    json: &str,
    branch: &str,
) -> Result<Option<PullRequestRecord>, CommandError> {
    let prs: Vec<PullRequestRecord> =
        serde_json::from_str(json.trim()).map_err(|e| CommandError::InvalidOutput {
            command: "gh pr list".to_string(),
            detail: format!("failed to parse PR list JSON: {}", e),
        })?;

    if prs.len() > 1 {
        warn!(
            "Found {} open PRs for branch {}; using #{}",
            prs.len(),
            branch,
            prs[0].number
        );
    }

    Ok(prs.into_iter().next())
}
