//! Read-only access to the working repository's pending changes and history.

use async_trait::async_trait;

use crate::error::CommandError;

/// Reads diffs, branch names and commit subjects from the working repository.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChangeCollector: Send + Sync {
    /// Staged (`--cached`) or unstaged diff text.
    async fn diff(&self, staged: bool) -> Result<String, CommandError>;

    /// True if either the staged or the unstaged diff is non-blank.
    async fn has_changes(&self) -> Result<bool, CommandError> {
        let staged = self.diff(true).await?;
        let unstaged = self.diff(false).await?;
        Ok(!staged.trim().is_empty() || !unstaged.trim().is_empty())
    }

    /// Subjects of non-merge commits on `head` that are not on the remote
    /// tracking ref of `base`, one per line.
    async fn commit_subjects(&self, base: &str, head: &str) -> Result<String, CommandError>;

    /// Subjects of non-merge commits reachable from HEAD but not from `reference`.
    async fn commits_since(&self, reference: &str) -> Result<String, CommandError>;

    /// Diff of `head` against its merge base with the remote tracking ref of `base`.
    async fn branch_diff(&self, base: &str, head: &str) -> Result<String, CommandError>;

    async fn current_branch(&self) -> Result<String, CommandError>;

    /// Upstream tracking ref of the current branch, if one is configured.
    async fn upstream_ref(&self) -> Result<Option<String>, CommandError>;

    async fn last_commit_subject(&self) -> Result<String, CommandError>;
}

/// The pending changes read at the start of an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub staged_diff: String,
    pub unstaged_diff: String,
    pub commit_subjects: Vec<String>,
}

impl ChangeSet {
    /// Read the staged and unstaged diffs.
    pub async fn read_working_tree(collector: &dyn ChangeCollector) -> Result<Self, CommandError> {
        Ok(Self {
            staged_diff: collector.diff(true).await?,
            unstaged_diff: collector.diff(false).await?,
            commit_subjects: Vec::new(),
        })
    }

    pub fn has_changes(&self) -> bool {
        !self.staged_diff.trim().is_empty() || !self.unstaged_diff.trim().is_empty()
    }

    /// Staged diff followed by unstaged diff, skipping blank parts.
    pub fn combined_diff(&self) -> String {
        [self.staged_diff.trim_end(), self.unstaged_diff.trim_end()]
            .into_iter()
            .filter(|d| !d.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Attach the subjects from `git log --pretty=format:%s` output.
    pub fn with_commit_subjects(mut self, subjects: &str) -> Self {
        self.commit_subjects = parse_subjects(subjects);
        self
    }
}

/// Split `git log --pretty=format:%s` output into non-blank subject lines.
pub fn parse_subjects(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
