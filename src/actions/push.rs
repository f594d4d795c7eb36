use tracing::{debug, warn};

use crate::error::{ActionError, CommandError};
use crate::git::{self, ChangeSet};
use crate::ui;

use super::{ActionOutcome, Assistant};

impl Assistant<'_> {
    /// Push the current branch, then create or update its pull request.
    pub async fn push(&self, extra_flags: &[String]) -> Result<ActionOutcome, ActionError> {
        ui::info("🌐", "Preparing to push changes...");

        let branch = self.changes.current_branch().await?;
        if branch == "HEAD" {
            return Err(ActionError::DetachedHead);
        }
        debug!("Current branch: {}", branch);

        let pending = self.pending_changes(&branch).await?;
        if pending.commit_subjects.is_empty() {
            ui::warning("ℹ️", "Nothing to push. Exiting.");
            return Ok(ActionOutcome::NothingToPush);
        }

        ui::info("🌐", "Pushing changes to remote...");
        self.executor.push(&branch, extra_flags).await?;
        ui::success("Changes pushed successfully!");

        let main_branch = &self.config().main_branch;
        let context = match self.changes.commit_subjects(main_branch, &branch).await {
            Ok(out) => ChangeSet::default().with_commit_subjects(&out),
            Err(e) => {
                warn!("Could not list commits against {}: {}", main_branch, e);
                pending
            }
        };
        let diff = self
            .changes
            .branch_diff(main_branch, &branch)
            .await
            .unwrap_or_else(|e| {
                warn!("Could not diff against {}: {}", main_branch, e);
                String::new()
            });

        self.reconciler()
            .reconcile(&branch, &context.commit_subjects, &diff, &git::detect(&branch))
            .await
    }

    /// Commits that a push would publish.
    ///
    /// Against the upstream when one is configured, otherwise against the
    /// remote main branch.
    async fn pending_changes(&self, branch: &str) -> Result<ChangeSet, CommandError> {
        let out = match self.changes.upstream_ref().await? {
            Some(upstream) => {
                debug!("Comparing against upstream {}", upstream);
                self.changes.commits_since(&upstream).await?
            }
            None => {
                self.changes
                    .commit_subjects(&self.config().main_branch, branch)
                    .await?
            }
        };
        Ok(ChangeSet::default().with_commit_subjects(&out))
    }
}
