//! # Post-Processor
//!
//! Pipes rendered source through an external formatter (`gofmt`,
//! `prettier --parser typescript`, `rustfmt --emit stdout`, ...).
//!
//! The buffer is written to a temporary file and the command is run as
//! `sh -c "(<command>) < <file>"`, so pipelines read the whole buffer; its
//! stdout replaces the buffer. A failing
//! command fails the whole generation: the unformatted text is never used
//! in its place.

use crate::error::{AppError, AppResult};
use std::io::Write;
use std::process::Command;
use tracing::{debug, warn};

/// Runs `command` with `source` on stdin and returns its stdout.
///
/// A blank command returns `source` unchanged.
///
/// # Errors
///
/// [`AppError::PostProcess`] when the command cannot be spawned or exits
/// with a non-zero status, [`AppError::Io`] when the input file cannot be
/// written.
pub fn run(command: &str, source: &[u8]) -> AppResult<Vec<u8>> {
    let command = command.trim();
    if command.is_empty() {
        return Ok(source.to_vec());
    }

    let mut input = tempfile::NamedTempFile::new()?;
    input.write_all(source)?;
    input.flush()?;

    let script = format!("(\n{}\n) < {}", command, shell_quote(&input.path().to_string_lossy()));
    debug!(%command, "running post-process command");

    let output = Command::new("sh")
        .arg("-c")
        .arg(&script)
        .output()
        .map_err(|e| AppError::PostProcess {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!(%command, status = %output.status, "post-process command failed");
        return Err(AppError::PostProcess {
            command: command.to_string(),
            reason: if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {}", output.status, stderr)
            },
        });
    }

    Ok(output.stdout)
}

/// Single-quotes a word for `sh`.
fn shell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}
