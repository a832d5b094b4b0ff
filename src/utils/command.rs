//! Utilities for running commands with captured output

use super::mirror::{MirrorError, MirrorResult, Result, SIGNAL_STATUS};
use std::io::ErrorKind;
use std::process::{Command, Stdio};
use tracing::debug;

/// Run a program to completion, capturing stdout and stderr in full
///
/// The exit status is returned as data; only a failure to start the
/// program is an error.
pub fn run_captured(program: &str, args: &[&str]) -> Result<MirrorResult> {
    let resolved = which::which(program)
        .map_err(|_| MirrorError::ExecutableNotFound(program.to_string()))?;

    debug!("Running command: {} {}", resolved.display(), args.join(" "));

    let output = Command::new(&resolved)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                MirrorError::ExecutableNotFound(program.to_string())
            }
            _ => MirrorError::Launch {
                program: program.to_string(),
                source: e,
            },
        })?;

    let status = output.status.code().unwrap_or(SIGNAL_STATUS);
    debug!("{} exited with status {}", program, status);

    Ok(MirrorResult {
        status,
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}
