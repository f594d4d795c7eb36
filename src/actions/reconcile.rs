//! Create or update the pull request for a pushed branch.

use tracing::{debug, warn};

use crate::error::ActionError;
use crate::git::TicketReference;
use crate::github::PrHost;
use crate::llm::InputBlock;
use crate::ui;

use super::{ActionOutcome, Drafter};

const NO_TICKET_TITLE_PREFIX: &str = "[NO-TICKET] ";

/// Branches on whether the branch already has an open pull request.
pub struct PrReconciler<'a> {
    drafter: Drafter<'a>,
    host: &'a dyn PrHost,
}

impl<'a> PrReconciler<'a> {
    pub fn new(drafter: Drafter<'a>, host: &'a dyn PrHost) -> Self {
        Self { drafter, host }
    }

    /// Update the open PR's body, or create a draft PR with a reviewed title
    /// and body, then open the PR in the browser.
    pub async fn reconcile(
        &self,
        branch: &str,
        commit_subjects: &[String],
        diff: &str,
        ticket: &TicketReference,
    ) -> Result<ActionOutcome, ActionError> {
        debug!("Checking for existing PR...");
        let existing = self.host.find_open_pr(branch).await?;

        let input = InputBlock::new()
            .ticket(ticket)
            .branch(branch)
            .commit_subjects(commit_subjects)
            .diff(diff);

        let number = match existing {
            Some(pr) => {
                ui::notice("📝", &format!("Pull request #{} found. Updating body...", pr.number));
                if !self.update(pr.number, &input).await? {
                    return Ok(ActionOutcome::Cancelled);
                }
                Some(pr.number)
            }
            None => {
                ui::info("🚀", "No existing PR found. Creating new PR...");
                if !self.create(input, ticket).await? {
                    return Ok(ActionOutcome::Cancelled);
                }
                self.resolve_new_number(branch).await
            }
        };

        self.open(number).await;
        Ok(ActionOutcome::Applied)
    }

    async fn update(&self, number: u64, input: &InputBlock) -> Result<bool, ActionError> {
        let prompts = &self.drafter.config().prompts;
        let body = self
            .drafter
            .draft(&prompts.pr_body, input, "pull request body")
            .await?;
        if !body.approved {
            ui::warning("🚫", "PR update canceled.");
            return Ok(false);
        }

        ui::info("📢", "Updating PR on GitHub...");
        self.host.update_body(number, &body.text).await?;
        ui::success("Pull Request updated successfully!");
        Ok(true)
    }

    async fn create(&self, input: InputBlock, ticket: &TicketReference) -> Result<bool, ActionError> {
        let prompts = &self.drafter.config().prompts;

        let candidate = self
            .drafter
            .generate(&prompts.pr_title, &input, "pull request title")
            .await?;
        let title = self
            .drafter
            .review(&title_line(&candidate, ticket), "pull request title")
            .await;
        if !title.approved {
            ui::warning("🚫", "PR creation canceled (no save on title).");
            return Ok(false);
        }

        // Editors commonly save a trailing newline.
        let title_text = title.text.trim_end();
        let input = input.pr_title(title_text);
        let body = self
            .drafter
            .draft(&prompts.pr_body, &input, "pull request body")
            .await?;
        if !body.approved {
            ui::warning("🚫", "PR creation canceled (no save on body).");
            return Ok(false);
        }

        ui::info("📢", "Creating a draft Pull Request on GitHub...");
        self.host.create_draft(title_text, &body.text).await?;
        ui::success("Pull Request created successfully!");
        Ok(true)
    }

    async fn resolve_new_number(&self, branch: &str) -> Option<u64> {
        match self.host.find_open_pr(branch).await {
            Ok(pr) => pr.map(|p| p.number),
            Err(e) => {
                warn!("Could not look up the new pull request: {}", e);
                None
            }
        }
    }

    async fn open(&self, number: Option<u64>) {
        let Some(number) = number else {
            ui::warning("⚠️", "No PR number to open in browser.");
            return;
        };
        ui::notice("🌐", "Opening PR in browser...");
        if let Err(e) = self.host.open_in_browser(number).await {
            warn!("Failed to open PR #{} in browser: {}", number, e);
        }
    }
}

/// First line of a generated title, without the placeholder ticket prefix.
pub fn title_line(candidate: &str, ticket: &TicketReference) -> String {
    let first = candidate.lines().next().unwrap_or_default();
    let first = if ticket.is_none() {
        first.strip_prefix(NO_TICKET_TITLE_PREFIX).unwrap_or(first)
    } else {
        first
    };
    first.to_string()
}
