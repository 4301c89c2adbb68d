use std::path::Path;
use std::process::Command;

use crate::errors::{Result, WwError};
use crate::traits::CommandRunner;

/// Runs commands through a POSIX `sh` (MinGW's on Windows).
///
/// The working directory is set on the child process only, so the tool's
/// own current directory is never touched.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    fn shell_command(command: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, working_dir: &Path, command: &str) -> Result<String> {
        tracing::debug!(
            event = "ww.shell.run",
            dir = %working_dir.display(),
            command = command
        );

        let output = Self::shell_command(command)
            .current_dir(working_dir)
            .output()
            .map_err(|e| WwError::CommandFailed {
                command: command.to_string(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {}", output.status, stderr.trim())
            };

            tracing::warn!(
                event = "ww.shell.failed",
                dir = %working_dir.display(),
                command = command,
                detail = %detail
            );
            return Err(WwError::CommandFailed {
                command: command.to_string(),
                detail,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Single-quotes a string for `sh`
#[must_use]
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\"'\"'"))
}
