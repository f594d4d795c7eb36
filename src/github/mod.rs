//! GitHub operations via the `gh` CLI.

pub mod auth;
pub mod prs;

pub use auth::{check_gh_authenticated, check_repo_permissions};
pub use prs::{GhCli, PrHost, PullRequestRecord};
