use tracing::debug;

use crate::error::ActionError;
use crate::git::{self, ChangeSet};
use crate::llm::InputBlock;
use crate::ui;

use super::{ActionOutcome, Assistant};

impl Assistant<'_> {
    /// Commit pending changes with a reviewed, generated message.
    ///
    /// Stages everything when nothing is staged yet. Staging is not undone if
    /// the operator then rejects the message.
    pub async fn commit(
        &self,
        amend: bool,
        extra_flags: &[String],
    ) -> Result<ActionOutcome, ActionError> {
        ui::info("📢", "Starting commit process...");

        let changes = ChangeSet::read_working_tree(self.changes).await?;
        if !changes.has_changes() {
            ui::warning("ℹ️", "Nothing to commit. Exiting.");
            return Ok(ActionOutcome::NoChanges);
        }

        let staged_diff = if changes.staged_diff.trim().is_empty() {
            ui::notice("🎁", "No changes staged. Automatically staging all...");
            self.executor.stage_all().await?;
            self.changes.diff(true).await?
        } else {
            ui::info("🎁", "Changes already staged.");
            changes.staged_diff
        };

        if amend {
            match self.changes.last_commit_subject().await {
                Ok(subject) => ui::notice("ℹ️", &format!("Amending last commit: {}", subject)),
                Err(e) => debug!("Could not read last commit subject: {}", e),
            }
        }

        let branch = self.changes.current_branch().await?;
        let input = InputBlock::new()
            .ticket(&git::detect(&branch))
            .branch(&branch)
            .diff(&staged_diff);

        let review = self
            .drafter
            .draft(&self.config().prompts.commit, &input, "commit message")
            .await?;
        if !review.approved {
            ui::warning("🚫", "Commit canceled by user.");
            return Ok(ActionOutcome::Cancelled);
        }

        let flags = commit_flags(amend, extra_flags);
        debug!("Committing changes with final message");
        self.executor.commit(&review.text, &flags).await?;
        ui::success("Changes committed successfully!");
        Ok(ActionOutcome::Applied)
    }
}

fn commit_flags(amend: bool, extra_flags: &[String]) -> Vec<String> {
    let mut flags = Vec::with_capacity(extra_flags.len() + 1);
    if amend {
        flags.push("--amend".to_string());
    }
    flags.extend_from_slice(extra_flags);
    flags
}
