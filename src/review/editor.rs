//! Review in the operator's editor via a scoped temporary file.

use std::path::Path;
use std::time::SystemTime;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::ReviewError;
use crate::ui;

use super::{Review, Reviewer};

/// Opens generated text in an editor and approves it once saved.
#[derive(Debug, Clone)]
pub struct EditorReviewer {
    editor: String,
}

impl EditorReviewer {
    /// `editor` is a command line and may carry arguments, e.g. `code --wait`.
    pub fn new(editor: impl Into<String>) -> Self {
        Self {
            editor: editor.into(),
        }
    }

    async fn edit(&self, initial: &str) -> Result<Review, ReviewError> {
        debug!("Creating a temp file for user edit");
        let file = tempfile::Builder::new()
            .prefix("gai-")
            .suffix(".txt")
            .tempfile()
            .map_err(ReviewError::CreateFailed)?;
        let path = file.path();

        std::fs::write(path, initial).map_err(|source| ReviewError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let before = modified(path);

        ui::info("✍️", "Opening editor for final review...");
        self.launch(path).await?;

        let final_text = read_back(&file)?;
        let saved = modified(path) != before || final_text != initial;

        if !saved || final_text.trim().is_empty() {
            ui::warning("⚠️", "No changes saved in the editor");
            return Ok(Review::rejected());
        }

        debug!("User saved new content");
        ui::show_text(&final_text);
        Ok(Review::approved(final_text))
    }

    async fn launch(&self, path: &Path) -> Result<(), ReviewError> {
        let status = editor_command(&self.editor, path)?
            .status()
            .await
            .map_err(|source| ReviewError::LaunchFailed {
                editor: self.editor.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ReviewError::EditorFailed {
                editor: self.editor.clone(),
                code: status.code(),
            });
        }
        Ok(())
    }
}

/// Build the editor invocation with `path` as its last argument.
///
/// A command that names an existing file runs as is, so unquoted paths with
/// spaces work. Anything else goes through `sh -c '<editor> "$@"'` like git
/// does, which allows quoting and arguments.
fn editor_command(editor: &str, path: &Path) -> Result<Command, ReviewError> {
    let editor = editor.trim();
    if editor.is_empty() {
        return Err(ReviewError::NoEditor);
    }

    if Path::new(editor).is_file() {
        let mut command = Command::new(editor);
        command.arg(path);
        return Ok(command);
    }

    shell_command(editor, path)
}

#[cfg(unix)]
fn shell_command(editor: &str, path: &Path) -> Result<Command, ReviewError> {
    let mut command = Command::new("sh");
    command
        .arg("-c")
        .arg(format!("{} \"$@\"", editor))
        .arg(editor)
        .arg(path);
    Ok(command)
}

#[cfg(not(unix))]
fn shell_command(editor: &str, path: &Path) -> Result<Command, ReviewError> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or(ReviewError::NoEditor)?;
    let mut command = Command::new(program);
    command.args(parts).arg(path);
    Ok(command)
}

#[async_trait]
impl Reviewer for EditorReviewer {
    async fn review(&self, initial: &str) -> Review {
        match self.edit(initial).await {
            Ok(review) => review,
            Err(e) => {
                warn!("Review failed: {}", e);
                ui::error(&e.to_string());
                Review::rejected()
            }
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn read_back(file: &NamedTempFile) -> Result<String, ReviewError> {
    std::fs::read_to_string(file.path()).map_err(|source| ReviewError::ReadFailed {
        path: file.path().to_path_buf(),
        source,
    })
}
