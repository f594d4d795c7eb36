//! Git mutations applied with approved text: stage, commit, stash, push.

use async_trait::async_trait;

use crate::error::CommandError;

/// Applies approved text to the repository.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    /// Stage every change in the working tree (`git add .`).
    async fn stage_all(&self) -> Result<(), CommandError>;

    /// `git commit -m <message>` followed by the operator's passthrough flags.
    async fn commit(&self, message: &str, extra_flags: &[String]) -> Result<(), CommandError>;

    /// `git stash push -m <message>` followed by the operator's passthrough flags.
    async fn stash(&self, message: &str, extra_flags: &[String]) -> Result<(), CommandError>;

    /// Fetch the main branch from the remote, then push `branch`.
    ///
    /// The fetch is fatal on failure: pushing against stale state is refused.
    async fn push(&self, branch: &str, extra_flags: &[String]) -> Result<(), CommandError>;
}

/// Build `git commit` arguments.
pub fn commit_args<'a>(message: &'a str, extra_flags: &'a [String]) -> Vec<&'a str> {
    let mut args = vec!["commit", "-m", message];
    args.extend(extra_flags.iter().map(String::as_str));
    args
}

/// Build `git stash push` arguments.
pub fn stash_args<'a>(message: &'a str, extra_flags: &'a [String]) -> Vec<&'a str> {
    let mut args = vec!["stash", "push", "-m", message];
    args.extend(extra_flags.iter().map(String::as_str));
    args
}

/// Build `git push` arguments, adding `--set-upstream` unless the operator
/// already asked for it.
pub fn push_args<'a>(remote: &'a str, branch: &'a str, extra_flags: &'a [String]) -> Vec<&'a str> {
    let mut args = vec!["push"];
    if !sets_upstream(extra_flags) {
        args.push("--set-upstream");
    }
    args.push(remote);
    args.push(branch);
    args.extend(extra_flags.iter().map(String::as_str));
    args
}

fn sets_upstream(flags: &[String]) -> bool {
    flags.iter().any(|f| {
        f == "-u" || f == "--set-upstream" || (f.starts_with('-') && !f.starts_with("--") && f.contains('u'))
    })
}
