//! gai - a CLI that writes commit messages, stash messages and pull requests
//! from your diff.
//!
//! # Overview
//!
//! gai reads the working tree and branch history with `git`, asks an
//! OpenAI-compatible chat-completions endpoint for candidate text, lets the
//! operator review it in their editor, and only then commits, stashes, or
//! pushes and creates/updates a draft pull request through `gh`.

pub mod actions;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod llm;
pub mod preflight;
pub mod process;
pub mod review;
pub mod ui;

// Re-export commonly used types
pub use actions::{ActionOutcome, Assistant};
pub use config::GaiConfig;
pub use error::{ActionError, CommandError, ConfigError, GenerationError, PreconditionError, ReviewError};
pub use git::{ChangeSet, TicketReference};
pub use review::Review;
