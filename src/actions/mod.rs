//! Commit, stash and push orchestration.
//!
//! Every action is a straight chain of awaited steps: read changes, generate
//! a candidate, review it, apply it. Nothing is mutated until the operator
//! approves the text, and a rejected review ends the action.

mod commit;
mod push;
pub mod reconcile;
mod stash;

use tracing::debug;

use crate::config::{GaiConfig, PromptTemplate};
use crate::error::GenerationError;
use crate::git::{ActionExecutor, ChangeCollector};
use crate::github::PrHost;
use crate::llm::{GenerationRequest, InputBlock, TextGenerator};
use crate::review::{Review, Reviewer};
use crate::ui;

pub use reconcile::PrReconciler;

/// How an action ended when nothing went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The approved text was applied.
    Applied,
    /// Nothing to commit or stash.
    NoChanges,
    /// No commits ahead of the upstream.
    NothingToPush,
    /// The operator rejected a review.
    Cancelled,
}

/// Generation followed by review, shared by every action.
#[derive(Clone, Copy)]
pub struct Drafter<'a> {
    config: &'a GaiConfig,
    generator: &'a dyn TextGenerator,
    reviewer: &'a dyn Reviewer,
}

impl<'a> Drafter<'a> {
    pub fn new(
        config: &'a GaiConfig,
        generator: &'a dyn TextGenerator,
        reviewer: &'a dyn Reviewer,
    ) -> Self {
        Self {
            config,
            generator,
            reviewer,
        }
    }

    pub fn config(&self) -> &'a GaiConfig {
        self.config
    }

    /// Candidate text for `task`, generated under a spinner.
    pub async fn generate(
        &self,
        task: &PromptTemplate,
        input: &InputBlock,
        subject: &str,
    ) -> Result<String, GenerationError> {
        debug!("Generating {} with AI", subject);
        let request = GenerationRequest::new(&self.config.prompts.system, task, input);

        let spinner = ui::spinner(&format!("🤖 Generating {}", subject));
        let candidate = self.generator.generate(&request).await;
        spinner.finish_and_clear();
        candidate
    }

    pub async fn review(&self, candidate: &str, subject: &str) -> Review {
        ui::info("🔎", &format!("Review AI-generated {} (editor will open)...", subject));
        self.reviewer.review(candidate).await
    }

    pub async fn draft(
        &self,
        task: &PromptTemplate,
        input: &InputBlock,
        subject: &str,
    ) -> Result<Review, GenerationError> {
        let candidate = self.generate(task, input, subject).await?;
        Ok(self.review(&candidate, subject).await)
    }
}

/// Runs one action against borrowed components.
pub struct Assistant<'a> {
    drafter: Drafter<'a>,
    changes: &'a dyn ChangeCollector,
    executor: &'a dyn ActionExecutor,
    host: &'a dyn PrHost,
}

impl<'a> Assistant<'a> {
    pub fn new(
        config: &'a GaiConfig,
        changes: &'a dyn ChangeCollector,
        executor: &'a dyn ActionExecutor,
        generator: &'a dyn TextGenerator,
        reviewer: &'a dyn Reviewer,
        host: &'a dyn PrHost,
    ) -> Self {
        Self {
            drafter: Drafter::new(config, generator, reviewer),
            changes,
            executor,
            host,
        }
    }

    fn config(&self) -> &'a GaiConfig {
        self.drafter.config()
    }

    fn reconciler(&self) -> PrReconciler<'a> {
        PrReconciler::new(self.drafter, self.host)
    }
}
