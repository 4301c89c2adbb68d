use std::path::Path;

use crate::errors::Result;

/// Trait for running external commands to enable mocking in tests
pub trait CommandRunner {
    /// Runs `command` through the shell in `working_dir` and returns its stdout
    ///
    /// # Errors
    /// Returns `CommandFailed` if the command cannot be spawned or exits non-zero
    fn run(&self, working_dir: &Path, command: &str) -> Result<String>;

    /// Number of newline-terminated lines `command` prints
    ///
    /// # Errors
    /// Same as [`CommandRunner::run`]
    fn run_count_lines(&self, working_dir: &Path, command: &str) -> Result<usize> {
        let output = self.run(working_dir, command)?;
        Ok(output.bytes().filter(|b| *b == b'\n').count())
    }
}
