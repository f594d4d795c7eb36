//! Human approval of generated text.

pub mod editor;

use async_trait::async_trait;

pub use editor::EditorReviewer;

/// Outcome of an approval step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub text: String,
    pub approved: bool,
}

impl Review {
    pub fn approved(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            approved: true,
        }
    }

    pub fn rejected() -> Self {
        Self {
            text: String::new(),
            approved: false,
        }
    }
}

/// Gates every generated text behind an operator decision.
///
/// Implementations never fail: problems are reported and mapped to a
/// rejected review.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Reviewer: Send + Sync {
    async fn review(&self, initial: &str) -> Review;
}
