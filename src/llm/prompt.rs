//! Prompt assembly for the text-generation call.

use crate::config::PromptTemplate;
use crate::git::TicketReference;

/// A single three-part prompt: system role, task instructions, input block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system: String,
    pub task: String,
    pub input: String,
}

impl GenerationRequest {
    pub fn new(system: &PromptTemplate, task: &PromptTemplate, input: &InputBlock) -> Self {
        Self {
            system: system.content.clone(),
            task: task.content.clone(),
            input: input.render(),
        }
    }
}

/// The `INPUT:` section describing the change to write about.
///
/// Fields that do not apply to a request are rendered empty, so every
/// template sees the same layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBlock {
    ticket: String,
    branch: String,
    pr_title: String,
    commit_subjects: Vec<String>,
    diff: String,
}

impl InputBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(mut self, ticket: &TicketReference) -> Self {
        self.ticket = ticket.as_str().to_string();
        self
    }

    pub fn branch(mut self, branch: &str) -> Self {
        self.branch = branch.to_string();
        self
    }

    pub fn pr_title(mut self, title: &str) -> Self {
        self.pr_title = title.to_string();
        self
    }

    pub fn commit_subjects(mut self, subjects: &[String]) -> Self {
        self.commit_subjects = subjects.to_vec();
        self
    }

    pub fn diff(mut self, diff: &str) -> Self {
        self.diff = diff.to_string();
        self
    }

    pub fn render(&self) -> String {
        format!(
            "INPUT:\n\
             TICKET NUMBER: {}\n\
             BRANCH NAME:   {}\n\
             PULL REQUEST TITLE: {}\n\
             COMMIT MESSAGES LIST:\n\
             {}\n\
             GIT DIFFERENCE TO HEAD:\n\
             {}\n",
            self.ticket,
            self.branch,
            self.pr_title,
            self.commit_subjects.join("\n"),
            self.diff
        )
    }
}
