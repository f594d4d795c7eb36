//! `git` subprocess implementation of [`ChangeCollector`] and [`ActionExecutor`].

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::CommandError;
use crate::process;
use crate::ui;

use super::actions::{ActionExecutor, commit_args, push_args, stash_args};
use super::changes::ChangeCollector;

/// Drives the system `git` binary in a working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: Option<PathBuf>,
    remote: String,
    main_branch: String,
}

impl GitCli {
    /// Operate on the repository containing the current directory.
    pub fn new(remote: impl Into<String>, main_branch: impl Into<String>) -> Self {
        Self {
            workdir: None,
            remote: remote.into(),
            main_branch: main_branch.into(),
        }
    }

    /// Operate on the repository at `dir` instead of the current directory.
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    async fn git(&self, args: &[&str]) -> Result<String, CommandError> {
        process::run("git", args, self.workdir.as_deref()).await
    }

    fn tracking_ref(&self, base: &str) -> String {
        format!("{}/{}", self.remote, base)
    }
}

#[async_trait]
impl ChangeCollector for GitCli {
    async fn diff(&self, staged: bool) -> Result<String, CommandError> {
        if staged {
            debug!("Fetching staged diff (git diff --cached)");
            self.git(&["diff", "--cached"]).await
        } else {
            debug!("Fetching unstaged diff (git diff)");
            self.git(&["diff"]).await
        }
    }

    async fn commit_subjects(&self, base: &str, head: &str) -> Result<String, CommandError> {
        let range = format!("{}..{}", self.tracking_ref(base), head);
        debug!("Getting commit messages between {}", range);
        self.git(&["log", &range, "--pretty=format:%s", "--no-merges"]).await
    }

    async fn commits_since(&self, reference: &str) -> Result<String, CommandError> {
        let range = format!("{}..HEAD", reference);
        debug!("Getting commit messages between {}", range);
        self.git(&["log", &range, "--pretty=format:%s", "--no-merges"]).await
    }

    async fn branch_diff(&self, base: &str, head: &str) -> Result<String, CommandError> {
        let range = format!("{}...{}", self.tracking_ref(base), head);
        debug!("Getting branch diff {}", range);
        self.git(&["diff", &range]).await
    }

    async fn current_branch(&self) -> Result<String, CommandError> {
        debug!("Getting current branch (git rev-parse --abbrev-ref HEAD)");
        let out = self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        Ok(out.trim().to_string())
    }

    async fn upstream_ref(&self) -> Result<Option<String>, CommandError> {
        match self
            .git(&["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"])
            .await
        {
            Ok(out) => {
                let upstream = out.trim();
                Ok((!upstream.is_empty()).then(|| upstream.to_string()))
            }
            Err(CommandError::NonZeroExit { output, .. }) => {
                debug!("No upstream configured: {}", output);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn last_commit_subject(&self) -> Result<String, CommandError> {
        let out = self.git(&["log", "-1", "--pretty=format:%s"]).await?;
        Ok(out.trim().to_string())
    }
}

#[async_trait]
impl ActionExecutor for GitCli {
    async fn stage_all(&self) -> Result<(), CommandError> {
        debug!("Staging all changes (git add .)");
        self.git(&["add", "."]).await.map(|_| ())
    }

    async fn commit(&self, message: &str, extra_flags: &[String]) -> Result<(), CommandError> {
        self.git(&commit_args(message, extra_flags)).await.map(|_| ())
    }

    async fn stash(&self, message: &str, extra_flags: &[String]) -> Result<(), CommandError> {
        self.git(&stash_args(message, extra_flags)).await.map(|_| ())
    }

    async fn push(&self, branch: &str, extra_flags: &[String]) -> Result<(), CommandError> {
        ui::info("🔎", &format!("Fetching latest from {}...", self.remote));
        let spinner = ui::spinner(&format!("🛰️ Fetching from {}", self.remote));
        let fetched = self.git(&["fetch", &self.remote, &self.main_branch]).await;
        spinner.finish_and_clear();
        fetched?;

        let spinner = ui::spinner("🚀 Pushing changes");
        let pushed = self.git(&push_args(&self.remote, branch, extra_flags)).await;
        spinner.finish_and_clear();
        pushed.map(|_| ())
    }
}
