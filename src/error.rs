//! Error types for gai modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from external `git` / `gh` subprocess invocations.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to spawn {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}:\n{output}",
            code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("`{command}` returned unexpected output: {detail}")]
    InvalidOutput { command: String, detail: String },
}

/// Errors from the text-generation service.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Text generation request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Text generation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Text generation service returned an unreadable response: {0}")]
    InvalidResponse(String),

    #[error("Text generation service returned no completions")]
    NoCompletions,
}

/// Prerequisites that must hold before any action runs.
#[derive(Error, Debug)]
pub enum PreconditionError {
    #[error("OPENAI_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("{0} not found in PATH")]
    ToolNotFound(&'static str),

    #[error("GitHub CLI not authenticated. Run 'gh auth login' first")]
    NotAuthenticated,

    #[error("Cannot check repository permissions: {0}")]
    PermissionCheckFailed(String),

    #[error("You do not have write permissions to this repository. Permission: {0}")]
    InsufficientPermission(String),
}

/// Failures inside the approval step. Never fatal: the review is rejected.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Failed to create review file: {0}")]
    CreateFailed(#[source] std::io::Error),

    #[error("Failed to write review file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor command is empty")]
    NoEditor,

    #[error("Failed to launch editor '{editor}': {source}")]
    LaunchFailed {
        editor: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor '{editor}' exited with code {code:?}")]
    EditorFailed { editor: String, code: Option<i32> },

    #[error("Failed to read updated file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to determine home directory for the gai config directory")]
    NoHomeDir,
}

/// Top-level error for a single commit / stash / push invocation.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("HEAD is detached. Check out a branch before pushing")]
    DetachedHead,
}
