use crate::error::ActionError;
use crate::git::{self, ChangeSet};
use crate::llm::InputBlock;
use crate::ui;

use super::{ActionOutcome, Assistant};

impl Assistant<'_> {
    /// Stash staged and unstaged changes under a reviewed, generated message.
    pub async fn stash(&self, extra_flags: &[String]) -> Result<ActionOutcome, ActionError> {
        ui::info("📢", "Stashing changes with AI message...");

        let changes = ChangeSet::read_working_tree(self.changes).await?;
        if !changes.has_changes() {
            ui::warning("ℹ️", "Nothing to stash. Exiting.");
            return Ok(ActionOutcome::NoChanges);
        }

        let branch = self.changes.current_branch().await?;
        let input = InputBlock::new()
            .ticket(&git::detect(&branch))
            .branch(&branch)
            .diff(&changes.combined_diff());

        let review = self
            .drafter
            .draft(&self.config().prompts.commit, &input, "stash message")
            .await?;
        if !review.approved {
            ui::warning("🚫", "Stash canceled by user.");
            return Ok(ActionOutcome::Cancelled);
        }

        self.executor.stash(&review.text, extra_flags).await?;
        ui::success("Changes stashed successfully!");
        Ok(ActionOutcome::Applied)
    }
}
