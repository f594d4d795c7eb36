//! Prerequisite checks run before any action touches the repository.

use tracing::debug;

use crate::config::GaiConfig;
use crate::error::PreconditionError;
use crate::github;

/// Which action is about to run; push needs the GitHub CLI as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Local,
    GitHub,
}

/// Check that `tool` resolves on PATH.
///
/// Uses the `which` crate for cross-platform executable detection.
pub fn check_tool(tool: &'static str) -> Result<(), PreconditionError> {
    match which::which(tool) {
        Ok(path) => {
            debug!("Found {} at {}", tool, path.display());
            Ok(())
        }
        Err(_) => Err(PreconditionError::ToolNotFound(tool)),
    }
}

/// Offline checks: API key and `git`, plus `gh` when pushing.
pub fn check_local(config: &GaiConfig, requirement: Requirement) -> Result<(), PreconditionError> {
    config.require_api_key()?;
    check_tool("git")?;
    if requirement == Requirement::GitHub {
        check_tool("gh")?;
    }
    Ok(())
}

/// All checks for `requirement`, including `gh` login and write access.
pub async fn check(config: &GaiConfig, requirement: Requirement) -> Result<(), PreconditionError> {
    check_local(config, requirement)?;
    if requirement == Requirement::GitHub {
        github::check_gh_authenticated().await?;
        github::check_repo_permissions().await?;
    }
    Ok(())
}
