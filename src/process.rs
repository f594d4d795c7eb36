//! Subprocess execution shared by the git and gh wrappers.
//!
//! Everything shells out to the system binaries, inheriting the user's git
//! config, SSH agent, credential store and `gh` login.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::CommandError;

/// Arguments longer than this are elided from error messages.
const MAX_DISPLAYED_ARG_LEN: usize = 60;

/// Run `program` with `args` and return its stdout.
///
/// On a non-zero exit the error carries stdout and stderr combined, which is
/// what the operator would have seen running the command by hand.
pub async fn run(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<String, CommandError> {
    let command = describe(program, args);
    debug!("Running command: {}", command);

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().await.map_err(|source| CommandError::SpawnFailed {
        program: program.to_string(),
        source,
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = format!("{}{}", stdout, stderr);
        return Err(CommandError::NonZeroExit {
            command,
            code: output.status.code(),
            output: combined.trim().to_string(),
        });
    }

    Ok(stdout)
}

/// Render a command line for logs and errors, eliding long or multi-line
/// arguments such as commit messages and PR bodies.
fn describe(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    for arg in args {
        if arg.len() > MAX_DISPLAYED_ARG_LEN || arg.contains('\n') {
            parts.push("<…>".to_string());
        } else {
            parts.push((*arg).to_string());
        }
    }
    parts.join(" ")
}
