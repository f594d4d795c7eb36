//! GitHub CLI authentication and repository permission checks.

use serde::Deserialize;
use tracing::debug;

use crate::error::PreconditionError;
use crate::process;

/// Permissions that allow pushing branches and opening pull requests.
const WRITE_PERMISSIONS: [&str; 3] = ["ADMIN", "MAINTAIN", "WRITE"];

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoView {
    viewer_permission: String,
}

/// Check that `gh auth status` succeeds.
pub async fn check_gh_authenticated() -> Result<(), PreconditionError> {
    match process::run("gh", &["auth", "status"], None).await {
        Ok(_) => Ok(()),
        Err(e) => {
            debug!("gh auth status failed: {}", e);
            Err(PreconditionError::NotAuthenticated)
        }
    }
}

/// Check that the authenticated user may write to the current repository.
pub async fn check_repo_permissions() -> Result<(), PreconditionError> {
    debug!("Checking repo permissions via gh CLI");
    let out = process::run("gh", &["repo", "view", "--json", "viewerPermission"], None)
        .await
        .map_err(|e| PreconditionError::PermissionCheckFailed(e.to_string()))?;
    check_viewer_permission(&out)
}

/// Validate the JSON printed by `gh repo view --json viewerPermission`.
pub fn check_viewer_permission(json: &str) -> Result<(), PreconditionError> {
    let view: RepoView = serde_json::from_str(json).map_err(|e| {
        PreconditionError::PermissionCheckFailed(format!("Cannot parse gh repo view output: {}", e))
    })?;

    if WRITE_PERMISSIONS.contains(&view.viewer_permission.as_str()) {
        Ok(())
    } else {
        Err(PreconditionError::InsufficientPermission(
            view.viewer_permission,
        ))
    }
}
